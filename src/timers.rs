//! Deferred callbacks on the single game event loop.
//!
//! Timers are data, not closures: the loop pops whatever is due and the game
//! dispatches on [`TimerKind`]. Ties on the due time fire in scheduling order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::mole::MoleId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Next spawn cycle of the session with this epoch.
    Spawn { epoch: u64 },
    /// Next one-second countdown tick of the session with this epoch.
    Countdown { epoch: u64 },
    /// Pull the mole down if nobody hit it. Fires regardless of session state.
    AutoFall(MoleId),
}

#[derive(Clone, Copy, Debug)]
pub struct Timer {
    pub due_ms: f64,
    seq: u64,
    pub kind: TimerKind,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    // Reversed so the std max-heap pops the earliest timer first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.due_ms.total_cmp(&self.due_ms).then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Timer { due_ms, seq, kind });
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Timer> {
        if self.heap.peek()?.due_ms <= now_ms { self.heap.pop() } else { None }
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|t| t.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending auto-fall timers for `id`.
    pub fn pending_auto_falls(&self, id: MoleId) -> usize {
        self.heap.iter().filter(|t| t.kind == TimerKind::AutoFall(id)).count()
    }
}
