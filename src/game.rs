//! The game loop: owns every piece of state and dispatches timers, clicks and
//! animation sampling on one logical thread.

use log::{info, trace};

use crate::animation::AnimationController;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::judge::{self, HitOutcome, ScoreRules};
use crate::mole::{Mole, MoleRegistry};
use crate::presenter::Presenter;
use crate::rng::{RandomSource, SeededRandom};
use crate::session::{Countdown, GameSession, Phase};
use crate::spawn::SpawnScheduler;
use crate::timers::{Timer, TimerKind, TimerQueue};
use crate::words::WordBank;

const COUNTDOWN_STEP_MS: f64 = 1000.0;

/// What a pointer click turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click started a new round.
    Started,
    /// Active round, but the pointer struck no mole.
    Missed,
    Hit(HitOutcome),
}

pub struct Game<P: Presenter, R: RandomSource = SeededRandom> {
    config: GameConfig,
    moles: MoleRegistry,
    session: GameSession,
    animation: AnimationController,
    spawner: SpawnScheduler,
    words: WordBank,
    rules: ScoreRules,
    timers: TimerQueue,
    rng: R,
    presenter: P,
    now_ms: f64,
}

impl<P: Presenter, R: RandomSource> Game<P, R> {
    pub fn new(config: GameConfig, presenter: P, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let mut game = Self {
            moles: MoleRegistry::new(&config),
            session: GameSession::new(config.round_seconds),
            animation: AnimationController::new(&config),
            spawner: SpawnScheduler::new(&config),
            words: WordBank::default().with_target_probability(config.target_probability),
            rules: ScoreRules { reward: config.hit_reward, penalty: config.miss_penalty },
            timers: TimerQueue::new(),
            rng,
            presenter,
            now_ms: 0.0,
            config,
        };
        game.sync_positions();
        game.presenter.show_start_prompt();
        Ok(game)
    }

    /// Route a pointer click. Idle: start a round. Active: hit-test and judge.
    pub fn click(&mut self, x: f64, y: f64, now_ms: f64) -> ClickOutcome {
        self.advance(now_ms);
        if !self.session.is_active() {
            self.start(self.now_ms);
            return ClickOutcome::Started;
        }
        let Some(id) = self.presenter.hit_test(x, y) else {
            return ClickOutcome::Missed;
        };
        let Some(mole) = self.moles.get_mut(id) else {
            return ClickOutcome::Missed;
        };
        ClickOutcome::Hit(judge::handle_hit(
            mole,
            &mut self.session,
            &self.animation,
            self.rules,
            &mut self.presenter,
            self.now_ms,
        ))
    }

    /// Idle -> Active. Does nothing while a round is running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        let Some(epoch) = self.session.start() else {
            return false;
        };
        info!("round {} started: {} s, {} moles", epoch, self.config.round_seconds, self.moles.len());
        self.spawner.start(&mut self.timers, epoch, now_ms);
        self.timers.schedule(now_ms + COUNTDOWN_STEP_MS, TimerKind::Countdown { epoch });
        self.presenter.refresh_score_display(self.session.score(), self.session.time_remaining());
        true
    }

    /// Run everything due up to `now_ms`. Animations are brought up to each
    /// timer's due time before it fires, so coarse frames and fine frames
    /// produce the same state. Time never runs backwards.
    pub fn advance(&mut self, now_ms: f64) {
        let now_ms = now_ms.max(self.now_ms);
        while let Some(timer) = self.timers.pop_due(now_ms) {
            self.step_animations(timer.due_ms);
            self.fire(timer);
        }
        self.step_animations(now_ms);
        self.now_ms = now_ms;
        self.sync_positions();
    }

    fn fire(&mut self, timer: Timer) {
        let at = timer.due_ms;
        match timer.kind {
            TimerKind::Spawn { epoch } => {
                if !self.is_live(epoch) {
                    return;
                }
                let spawned = self.spawner.on_spawn(
                    &mut self.moles,
                    &self.animation,
                    &self.words,
                    &mut self.rng,
                    &mut self.timers,
                    epoch,
                    at,
                );
                if let Some(mole) = spawned.and_then(|id| self.moles.get(id)) {
                    self.presenter.render_mole_word(mole.id(), mole.word());
                }
            }
            TimerKind::Countdown { epoch } => {
                if epoch != self.session.epoch() {
                    return;
                }
                match self.session.tick() {
                    Countdown::Ignored => {}
                    Countdown::Running { remaining } => {
                        self.presenter.refresh_score_display(self.session.score(), remaining);
                        self.timers.schedule(at + COUNTDOWN_STEP_MS, TimerKind::Countdown { epoch });
                    }
                    Countdown::Finished { final_score } => {
                        info!("round {} over, final score {}", epoch, final_score);
                        self.presenter.refresh_score_display(final_score, 0);
                        self.presenter.show_game_over_prompt(final_score);
                    }
                }
            }
            TimerKind::AutoFall(id) => {
                if self.spawner.on_auto_fall(&mut self.moles, &self.animation, id, at) {
                    self.presenter.render_mole_word(id, "");
                }
            }
        }
    }

    fn is_live(&self, epoch: u64) -> bool {
        self.session.is_active() && self.session.epoch() == epoch
    }

    fn step_animations(&mut self, at: f64) {
        for mole in self.moles.iter_mut() {
            if let Some(direction) = self.animation.advance(mole, at) {
                trace!("{} finished {:?} at {:.0} ms", mole.id(), direction, at);
            }
        }
    }

    fn sync_positions(&mut self) {
        for mole in self.moles.iter() {
            self.presenter.place_mole(mole.id(), mole.position());
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn moles(&self) -> &[Mole] {
        self.moles.as_slice()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mole::MoleId;
    use crate::presenter::{HeadlessPresenter, PresenterEvent};
    use crate::rng::ScriptedRandom;

    fn game(values: &[f64]) -> Game<HeadlessPresenter, ScriptedRandom> {
        Game::new(GameConfig::default(), HeadlessPresenter::new(), ScriptedRandom::new(values.to_vec()))
            .unwrap()
    }

    #[test]
    fn test_new_game_shows_start_prompt_and_is_idle() {
        let g = game(&[0.0]);
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.presenter().events, vec![PresenterEvent::StartPrompt]);
        assert_eq!(g.pending_timers(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = GameConfig { mole_count: 0, ..GameConfig::default() };
        let res = Game::new(cfg, HeadlessPresenter::new(), ScriptedRandom::new([0.0]));
        assert!(res.is_err());
    }

    #[test]
    fn test_idle_click_starts_without_hit_test() {
        let mut g = game(&[0.0]);
        g.presenter_mut().aim_at(Some(MoleId(0)));
        assert_eq!(g.click(0.0, 0.0, 100.0), ClickOutcome::Started);
        assert_eq!(g.phase(), Phase::Active);
        assert_eq!(g.score(), 0);
        assert_eq!(g.time_remaining(), 30);
        assert_eq!(g.presenter().last_score(), Some((0, 30)));
    }

    #[test]
    fn test_spawn_cycle_and_auto_fall() {
        // mole index 0.5*4=2, target word, first word
        let mut g = game(&[0.5, 0.1, 0.0]);
        g.start(0.0);
        g.advance(1999.0);
        assert!(g.moles().iter().all(Mole::is_idle));

        g.advance(2000.0);
        let m = &g.moles()[2];
        assert!(m.is_moving());
        assert_eq!(m.word(), crate::SHORT_A_WORDS[0]);

        g.advance(2200.0);
        assert!(g.moles()[2].is_hittable());

        g.advance(3500.0);
        assert!(g.moles()[2].is_moving());
        assert_eq!(g.moles()[2].word(), "");

        g.advance(3700.0);
        assert!(g.moles()[2].is_idle());
    }

    #[test]
    fn test_hit_while_rising_is_ignored() {
        let mut g = game(&[0.0, 0.1, 0.0]);
        g.start(0.0);
        g.advance(2100.0);
        g.presenter_mut().aim_at(Some(MoleId(0)));
        assert_eq!(g.click(0.0, 0.0, 2100.0), ClickOutcome::Hit(HitOutcome::Ignored));
        assert_eq!(g.score(), 0);
        assert_eq!(g.click(0.0, 0.0, 2250.0), ClickOutcome::Hit(HitOutcome::Correct { score: 10 }));
        assert!(g.moles()[0].is_moving());
    }

    #[test]
    fn test_click_on_nothing_is_a_miss() {
        let mut g = game(&[0.0]);
        g.start(0.0);
        assert_eq!(g.click(5.0, 5.0, 10.0), ClickOutcome::Missed);
        g.presenter_mut().aim_at(Some(MoleId(42)));
        assert_eq!(g.click(5.0, 5.0, 20.0), ClickOutcome::Missed);
    }

    #[test]
    fn test_time_does_not_run_backwards() {
        let mut g = game(&[0.0]);
        g.start(0.0);
        g.advance(5000.0);
        g.advance(100.0);
        assert_eq!(g.now_ms(), 5000.0);
        assert_eq!(g.time_remaining(), 25);
    }

    #[test]
    fn test_positions_pushed_to_presenter() {
        struct Tracker(Vec<(MoleId, glam::Vec3)>);
        impl Presenter for Tracker {
            fn hit_test(&self, _: f64, _: f64) -> Option<MoleId> {
                None
            }
            fn render_mole_word(&mut self, _: MoleId, _: &str) {}
            fn show_success_effect(&mut self, _: glam::Vec3) {}
            fn refresh_score_display(&mut self, _: u32, _: u32) {}
            fn show_start_prompt(&mut self) {}
            fn show_game_over_prompt(&mut self, _: u32) {}
            fn place_mole(&mut self, mole: MoleId, position: glam::Vec3) {
                self.0.push((mole, position));
            }
        }
        let mut g = Game::new(GameConfig::default(), Tracker(Vec::new()), ScriptedRandom::new([0.0])).unwrap();
        assert_eq!(g.presenter().0.len(), 4);
        g.advance(16.0);
        assert_eq!(g.presenter().0.len(), 8);
        assert!(g.presenter().0.iter().all(|(_, p)| p.y == -1.0));
    }
}
