//! Judging a hit and keeping score.

use log::debug;

use crate::animation::AnimationController;
use crate::mole::Mole;
use crate::presenter::Presenter;
use crate::session::GameSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Session idle or mole not fully up; nothing happened.
    Ignored,
    Correct { score: u32 },
    Wrong { score: u32 },
}

/// Points awarded and deducted per hit.
#[derive(Clone, Copy, Debug)]
pub struct ScoreRules {
    pub reward: u32,
    pub penalty: u32,
}

/// Judge a hit on `mole`. Any registered hit retracts the mole whether the
/// word was right or not.
pub fn handle_hit<P: Presenter + ?Sized>(
    mole: &mut Mole,
    session: &mut GameSession,
    animation: &AnimationController,
    rules: ScoreRules,
    presenter: &mut P,
    now_ms: f64,
) -> HitOutcome {
    if !session.is_active() || !mole.is_hittable() {
        return HitOutcome::Ignored;
    }
    let word = mole.word();
    let correct = mole.is_target_word();
    if correct {
        session.award(rules.reward);
        presenter.show_success_effect(mole.position());
    } else {
        session.penalize(rules.penalty);
    }
    debug!("{} hit on '{}' ({}), score {}", mole.id(), word, if correct { "correct" } else { "wrong" }, session.score());

    if animation.lower(mole, now_ms) {
        presenter.render_mole_word(mole.id(), "");
    }
    presenter.refresh_score_display(session.score(), session.time_remaining());

    if correct {
        HitOutcome::Correct { score: session.score() }
    } else {
        HitOutcome::Wrong { score: session.score() }
    }
}
