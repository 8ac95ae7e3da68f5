//! The seam between game logic and whatever draws it.

use glam::Vec3;

use crate::mole::MoleId;

/// Everything the game needs from the presentation layer. Apart from
/// `hit_test` all calls are fire-and-forget notifications.
pub trait Presenter {
    /// Map a pointer position in viewport coordinates to the struck mole.
    fn hit_test(&self, x: f64, y: f64) -> Option<MoleId>;

    /// Show `word` on the mole; an empty string clears it.
    fn render_mole_word(&mut self, mole: MoleId, word: &str);

    /// Cosmetic cue for a correct hit near `at`.
    fn show_success_effect(&mut self, at: Vec3);

    fn refresh_score_display(&mut self, score: u32, time_remaining: u32);

    fn show_start_prompt(&mut self);

    fn show_game_over_prompt(&mut self, final_score: u32);

    /// Current world position of a mole, pushed every frame.
    fn place_mole(&mut self, _mole: MoleId, _position: Vec3) {}
}

/// Notifications recorded by [`HeadlessPresenter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterEvent {
    Word { mole: MoleId, word: String },
    SuccessEffect { at: Vec3 },
    Score { score: u32, time_remaining: u32 },
    StartPrompt,
    GameOver { final_score: u32 },
}

/// Presenter without a screen: records notifications and resolves every
/// pointer event to whichever mole it is currently aimed at.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPresenter {
    pub events: Vec<PresenterEvent>,
    aimed_at: Option<MoleId>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aim_at(&mut self, mole: Option<MoleId>) {
        self.aimed_at = mole;
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn success_effects(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, PresenterEvent::SuccessEffect { .. })).count()
    }

    pub fn last_score(&self) -> Option<(u32, u32)> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Score { score, time_remaining } => Some((*score, *time_remaining)),
            _ => None,
        })
    }

    /// Words shown on moles, in order, skipping clears.
    pub fn shown_words(&self) -> Vec<(MoleId, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Word { mole, word } if !word.is_empty() => {
                    Some((*mole, word.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

impl Presenter for HeadlessPresenter {
    fn hit_test(&self, _x: f64, _y: f64) -> Option<MoleId> {
        self.aimed_at
    }

    fn render_mole_word(&mut self, mole: MoleId, word: &str) {
        self.events.push(PresenterEvent::Word { mole, word: word.to_string() });
    }

    fn show_success_effect(&mut self, at: Vec3) {
        self.events.push(PresenterEvent::SuccessEffect { at });
    }

    fn refresh_score_display(&mut self, score: u32, time_remaining: u32) {
        self.events.push(PresenterEvent::Score { score, time_remaining });
    }

    fn show_start_prompt(&mut self) {
        self.events.push(PresenterEvent::StartPrompt);
    }

    fn show_game_over_prompt(&mut self, final_score: u32) {
        self.events.push(PresenterEvent::GameOver { final_score });
    }
}
