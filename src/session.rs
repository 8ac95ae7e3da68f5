//! Round state: score, countdown and the Idle / Active state machine.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a click to start (initial state and after game over).
    Idle,
    Active,
}

/// What a countdown tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    /// Session already over; nothing changed.
    Ignored,
    Running { remaining: u32 },
    Finished { final_score: u32 },
}

#[derive(Clone, Debug)]
pub struct GameSession {
    phase: Phase,
    score: u32,
    time_remaining: u32,
    round_seconds: u32,
    /// Bumped on every start so timers from a previous round can be told apart.
    epoch: u64,
    finished_rounds: u32,
}

impl GameSession {
    pub fn new(round_seconds: u32) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            time_remaining: round_seconds,
            round_seconds,
            epoch: 0,
            finished_rounds: 0,
        }
    }

    /// Idle -> Active. Returns the epoch of the new round, or `None` when a
    /// round is already running.
    pub fn start(&mut self) -> Option<u64> {
        if self.is_active() {
            return None;
        }
        self.phase = Phase::Active;
        self.score = 0;
        self.time_remaining = self.round_seconds;
        self.epoch += 1;
        Some(self.epoch)
    }

    /// One second elapsed. Reaching zero ends the round.
    pub fn tick(&mut self) -> Countdown {
        if !self.is_active() {
            return Countdown::Ignored;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return Countdown::Running { remaining: self.time_remaining };
        }
        self.phase = Phase::Idle;
        self.finished_rounds += 1;
        Countdown::Finished { final_score: self.score }
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Deduct points, flooring at zero.
    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True only once at least one round has run to completion.
    pub fn is_game_over(&self) -> bool {
        !self.is_active() && self.finished_rounds > 0
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_round() {
        let mut s = GameSession::new(30);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.start(), Some(1));
        s.award(40);
        assert_eq!(s.start(), None, "cannot restart while active");
        for _ in 0..30 {
            s.tick();
        }
        assert_eq!(s.start(), Some(2));
        assert_eq!(s.score(), 0);
        assert_eq!(s.time_remaining(), 30);
    }

    #[test]
    fn test_countdown_finishes_once() {
        let mut s = GameSession::new(3);
        s.start();
        s.award(10);
        assert_eq!(s.tick(), Countdown::Running { remaining: 2 });
        assert_eq!(s.tick(), Countdown::Running { remaining: 1 });
        assert_eq!(s.tick(), Countdown::Finished { final_score: 10 });
        assert!(s.is_game_over());
        assert_eq!(s.tick(), Countdown::Ignored);
        assert_eq!(s.time_remaining(), 0);
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut s = GameSession::new(30);
        s.start();
        s.award(3);
        s.penalize(5);
        assert_eq!(s.score(), 0);
        s.penalize(5);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_idle_tick_is_ignored() {
        let mut s = GameSession::new(30);
        assert_eq!(s.tick(), Countdown::Ignored);
        assert_eq!(s.time_remaining(), 30);
        assert!(!s.is_game_over());
    }
}
