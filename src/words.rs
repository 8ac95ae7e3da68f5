//! Word lists and the weighted word picker.

use crate::rng::RandomSource;
use crate::{OTHER_WORDS, SHORT_A_WORDS};

/// A word handed to a rising mole together with its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickedWord {
    pub text: &'static str,
    /// True when the word carries the target (short "a") sound.
    pub is_target: bool,
}

/// Immutable target / other word lists plus the odds of drawing a target word.
#[derive(Clone, Debug)]
pub struct WordBank {
    target: &'static [&'static str],
    other: &'static [&'static str],
    target_probability: f64,
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new(SHORT_A_WORDS, OTHER_WORDS, 0.7)
    }
}

impl WordBank {
    /// Build a bank from a target list and an other list.
    ///
    /// # Panics
    ///
    /// Panics if either list is empty.
    pub fn new(
        target: &'static [&'static str],
        other: &'static [&'static str],
        target_probability: f64,
    ) -> Self {
        assert!(!target.is_empty() && !other.is_empty(), "word lists must not be empty");
        Self { target, other, target_probability: target_probability.clamp(0.0, 1.0) }
    }

    pub fn with_target_probability(mut self, p: f64) -> Self {
        self.target_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Draw the category first, then a word uniformly from that list.
    pub fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> PickedWord {
        let is_target = rng.next_unit() < self.target_probability;
        let pool = if is_target { self.target } else { self.other };
        PickedWord { text: pool[rng.pick_index(pool.len())], is_target }
    }

    pub fn is_target(&self, word: &str) -> bool {
        self.target.contains(&word)
    }
}
