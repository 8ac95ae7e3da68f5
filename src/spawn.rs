//! Periodic mole spawning and the automatic pull-down of unhit moles.

use log::debug;

use crate::animation::AnimationController;
use crate::config::GameConfig;
use crate::mole::{MoleId, MoleRegistry};
use crate::rng::RandomSource;
use crate::timers::{TimerKind, TimerQueue};
use crate::words::WordBank;

#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    interval_ms: f64,
    auto_fall_delay_ms: f64,
}

impl SpawnScheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self { interval_ms: config.spawn_interval_ms, auto_fall_delay_ms: config.auto_fall_delay_ms }
    }

    /// Queue the first spawn cycle one interval after `now_ms`.
    pub fn start(&self, timers: &mut TimerQueue, epoch: u64, now_ms: f64) {
        timers.schedule(now_ms + self.interval_ms, TimerKind::Spawn { epoch });
    }

    /// One spawn cycle. The caller only invokes this for the live session;
    /// the next cycle is always queued. Returns the mole that started rising.
    #[allow(clippy::too_many_arguments)]
    pub fn on_spawn<R: RandomSource + ?Sized>(
        &self,
        moles: &mut MoleRegistry,
        animation: &AnimationController,
        words: &WordBank,
        rng: &mut R,
        timers: &mut TimerQueue,
        epoch: u64,
        now_ms: f64,
    ) -> Option<MoleId> {
        timers.schedule(now_ms + self.interval_ms, TimerKind::Spawn { epoch });

        let idle = moles.idle_ids();
        if idle.is_empty() {
            debug!("spawn skipped: no idle mole");
            return None;
        }
        let id = idle[rng.pick_index(idle.len())];
        let mole = moles.get_mut(id)?;
        if !animation.raise(mole, now_ms, || words.pick(rng)) {
            return None;
        }
        debug!("{} rising with '{}'", id, mole.word());
        timers.schedule(now_ms + self.auto_fall_delay_ms, TimerKind::AutoFall(id));
        Some(id)
    }

    /// Deferred check after a spawn: retract the mole if it is still up.
    /// Runs even after the round ended so no mole stays stuck up.
    pub fn on_auto_fall(
        &self,
        moles: &mut MoleRegistry,
        animation: &AnimationController,
        id: MoleId,
        now_ms: f64,
    ) -> bool {
        match moles.get_mut(id) {
            Some(mole) if mole.is_up() => animation.lower(mole, now_ms),
            _ => false,
        }
    }
}
