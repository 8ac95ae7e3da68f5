//! Rise / fall transitions for a single mole.
//!
//! A transition is a pure function of elapsed time: it records where it
//! started, where it is heading and when it began, and every sample
//! recomputes the offset from the shared clock. Nothing here owns a timer;
//! the game loop decides when to sample.

use crate::config::GameConfig;
use crate::mole::Mole;
use crate::words::PickedWord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Symmetric quadratic ease-in-ease-out over normalized progress `t`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 { 2.0 * t * t } else { -1.0 + (4.0 - 2.0 * t) * t }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub direction: Direction,
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
}

impl Transition {
    /// Normalized progress at `now_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn offset_at(&self, now_ms: f64) -> f32 {
        let eased = ease_in_out_quad(self.progress(now_ms)) as f32;
        self.from + (self.to - self.from) * eased
    }
}

/// Starts and samples transitions with a fixed duration and fixed endpoints.
#[derive(Clone, Debug)]
pub struct AnimationController {
    duration_ms: f64,
    raised_offset: f32,
    lowered_offset: f32,
}

impl AnimationController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            duration_ms: config.transition_ms,
            raised_offset: config.raised_offset,
            lowered_offset: config.lowered_offset,
        }
    }

    /// Begin rising. The word is drawn only if the transition actually starts,
    /// and is visible on the mole immediately. Returns `false` (mole untouched)
    /// when the mole is already moving.
    pub fn raise(
        &self,
        mole: &mut Mole,
        now_ms: f64,
        pick_word: impl FnOnce() -> PickedWord,
    ) -> bool {
        if !self.begin(mole, Direction::Up, now_ms) {
            return false;
        }
        mole.word = Some(pick_word());
        true
    }

    /// Begin falling and clear the word at once. Returns `false` (mole
    /// untouched) when the mole is already moving.
    pub fn lower(&self, mole: &mut Mole, now_ms: f64) -> bool {
        if !self.begin(mole, Direction::Down, now_ms) {
            return false;
        }
        mole.word = None;
        true
    }

    fn begin(&self, mole: &mut Mole, direction: Direction, now_ms: f64) -> bool {
        if mole.is_moving() {
            return false;
        }
        let to = match direction {
            Direction::Up => self.raised_offset,
            Direction::Down => self.lowered_offset,
        };
        mole.transition = Some(Transition {
            direction,
            from: mole.offset,
            to,
            start_ms: now_ms,
            duration_ms: self.duration_ms,
        });
        true
    }

    /// Sample the mole's transition at `now_ms`. When progress reaches 1 the
    /// transition is retired, `is_up` reflects its direction and the finished
    /// direction is returned.
    pub fn advance(&self, mole: &mut Mole, now_ms: f64) -> Option<Direction> {
        let transition = mole.transition.as_ref()?;
        mole.offset = transition.offset_at(now_ms);
        if transition.progress(now_ms) < 1.0 {
            return None;
        }
        let direction = transition.direction;
        mole.offset = transition.to;
        mole.transition = None;
        mole.is_up = direction == Direction::Up;
        Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mole::MoleId;
    use glam::Vec3;

    const CAT: PickedWord = PickedWord { text: "cat", is_target: true };

    fn setup() -> (AnimationController, Mole) {
        let cfg = GameConfig::default();
        (AnimationController::new(&cfg), Mole::new(MoleId(0), Vec3::ZERO, cfg.lowered_offset))
    }

    #[test]
    fn test_ease_curve_points() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-12);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-12);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 1e-12);
        assert_eq!(ease_in_out_quad(-3.0), 0.0);
        assert_eq!(ease_in_out_quad(7.0), 1.0);
    }

    #[test]
    fn test_ease_is_monotonic_and_symmetric() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = ease_in_out_quad(t);
            assert!(v >= prev);
            assert!((v + ease_in_out_quad(1.0 - t) - 1.0).abs() < 1e-9);
            prev = v;
        }
    }

    #[test]
    fn test_raise_assigns_word_immediately() {
        let (anim, mut mole) = setup();
        assert!(anim.raise(&mut mole, 0.0, || CAT));
        assert!(mole.is_moving());
        assert!(!mole.is_up());
        assert_eq!(mole.word(), "cat");
        assert!(mole.is_target_word());
    }

    #[test]
    fn test_second_transition_is_noop_while_moving() {
        let (anim, mut mole) = setup();
        assert!(anim.raise(&mut mole, 0.0, || CAT));
        let before = mole.transition.clone();
        let mut picked = false;
        assert!(!anim.raise(&mut mole, 50.0, || {
            picked = true;
            PickedWord { text: "hot", is_target: false }
        }));
        assert!(!anim.lower(&mut mole, 60.0));
        assert!(!picked);
        assert_eq!(mole.transition, before);
        assert_eq!(mole.word(), "cat");
    }

    #[test]
    fn test_full_round_trip() {
        let (anim, mut mole) = setup();
        anim.raise(&mut mole, 1000.0, || CAT);
        assert_eq!(anim.advance(&mut mole, 1100.0), None);
        assert!((mole.offset() - (-0.25)).abs() < 1e-5);
        assert_eq!(anim.advance(&mut mole, 1200.0), Some(Direction::Up));
        assert!(mole.is_up());
        assert!(!mole.is_moving());
        assert_eq!(mole.offset(), 0.5);
        assert_eq!(mole.word(), "cat");

        assert!(anim.lower(&mut mole, 2000.0));
        assert_eq!(mole.word(), "");
        assert!(mole.is_up(), "still counts as up until the fall completes");
        assert_eq!(anim.advance(&mut mole, 2500.0), Some(Direction::Down));
        assert!(!mole.is_up());
        assert_eq!(mole.offset(), -1.0);
    }

    #[test]
    fn test_advance_without_transition_is_none() {
        let (anim, mut mole) = setup();
        assert_eq!(anim.advance(&mut mole, 10.0), None);
        assert_eq!(mole.offset(), -1.0);
    }

    #[test]
    fn test_fall_starts_from_current_offset() {
        let (anim, mut mole) = setup();
        mole.offset = 0.0;
        mole.is_up = true;
        anim.lower(&mut mole, 0.0);
        anim.advance(&mut mole, 100.0);
        assert!((mole.offset() - (-0.5)).abs() < 1e-5);
    }
}
