//! Tunable game constants.
//!
//! Every timing, scoring and geometry knob lives on [`GameConfig`]; the
//! `Default` impl is the shipped game. With the `serde` feature a partial
//! JSON object can override individual fields.

use crate::error::GameError;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Number of holes / moles. Allocated once per game instance.
    pub mole_count: usize,
    /// Length of one round in whole seconds.
    pub round_seconds: u32,
    /// Delay between spawn attempts.
    pub spawn_interval_ms: f64,
    /// Delay after a spawn before an unhit mole is pulled back down.
    pub auto_fall_delay_ms: f64,
    /// Duration of a single rise or fall.
    pub transition_ms: f64,
    /// Chance a freshly picked word comes from the short "a" list.
    pub target_probability: f64,
    pub hit_reward: u32,
    pub miss_penalty: u32,
    /// Vertical offset of a fully raised mole (world units).
    pub raised_offset: f32,
    /// Vertical offset of a hidden mole (world units).
    pub lowered_offset: f32,
    /// Horizontal distance between neighbouring holes (world units).
    pub slot_spacing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mole_count: 4,
            round_seconds: 30,
            spawn_interval_ms: 2000.0,
            auto_fall_delay_ms: 1500.0,
            transition_ms: 200.0,
            target_probability: 0.7,
            hit_reward: 10,
            miss_penalty: 5,
            raised_offset: 0.5,
            lowered_offset: -1.0,
            slot_spacing: 2.5,
        }
    }
}

impl GameConfig {
    /// Reject configurations the game loop cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.mole_count == 0 {
            return Err(GameError::InvalidConfig("mole_count must be at least 1".into()));
        }
        if self.round_seconds == 0 {
            return Err(GameError::InvalidConfig("round_seconds must be at least 1".into()));
        }
        for (name, value) in [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("auto_fall_delay_ms", self.auto_fall_delay_ms),
            ("transition_ms", self.transition_ms),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be a positive number of milliseconds, got {value}"
                )));
            }
        }
        // A mole's auto-fall must fire before the next spawn could raise it again.
        if self.auto_fall_delay_ms >= self.spawn_interval_ms {
            return Err(GameError::InvalidConfig(
                "auto_fall_delay_ms must be shorter than spawn_interval_ms".into(),
            ));
        }
        // The rise must finish before the auto-fall checks `is_up`, or the
        // mole is left up with nothing pending to lower it.
        if self.transition_ms >= self.auto_fall_delay_ms {
            return Err(GameError::InvalidConfig(
                "transition_ms must be shorter than auto_fall_delay_ms".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.target_probability) {
            return Err(GameError::InvalidConfig(format!(
                "target_probability must lie in [0, 1], got {}",
                self.target_probability
            )));
        }
        if self.raised_offset <= self.lowered_offset {
            return Err(GameError::InvalidConfig(
                "raised_offset must be above lowered_offset".into(),
            ));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config and validate it.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
