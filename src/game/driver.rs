//! Frame driver: couples a [`Session`] to a clock and its collaborators.
//!
//! The host calls [`Game::frame`] once per animation frame and reschedules
//! while it returns [`LoopControl::Continue`]. Game over does not stop the
//! loop; ticks are simply inert until a restart.

use log::info;

use super::clock::FrameClock;
use super::config::GameConfig;
use super::session::{GameState, Session, SessionEvent};
use super::sinks::{BestScoreStore, ScoreSink};
use crate::render::{RenderSurface, render_frame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct Game {
    session: Session,
    clock: FrameClock,
    scores: Box<dyn ScoreSink>,
    store: Box<dyn BestScoreStore>,
    stopped: bool,
}

impl Game {
    /// Builds an idle game, reading the stored best score.
    pub fn new(config: GameConfig, scores: Box<dyn ScoreSink>, store: Box<dyn BestScoreStore>) -> Self {
        let session = Session::new(config, store.best_score());
        Self::with_session(session, scores, store)
    }

    pub fn with_session(
        session: Session,
        mut scores: Box<dyn ScoreSink>,
        store: Box<dyn BestScoreStore>,
    ) -> Self {
        scores.on_best_score(session.best_score());
        scores.on_state_changed(session.state());
        Self {
            clock: FrameClock::new(session.config().clock),
            session,
            scores,
            store,
            stopped: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn start(&mut self) {
        self.session.start();
        self.dispatch_events();
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.dispatch_events();
    }

    /// Jump input. Outside play it acts as start / restart.
    pub fn jump(&mut self) {
        match self.session.state() {
            GameState::Playing => {
                self.session.request_jump();
            }
            GameState::Idle | GameState::GameOver => self.start(),
        }
    }

    pub fn set_ducking(&mut self, held: bool) {
        self.session.set_ducking(held);
    }

    /// Ends the loop for good; the next frame returns [`LoopControl::Stop`].
    pub fn stop(&mut self) {
        if !self.stopped {
            info!("game loop stopped");
        }
        self.stopped = true;
    }

    /// Simulates the ticks due at `timestamp_ms`, forwards events and draws.
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, timestamp_ms: f64, surface: &mut S) -> LoopControl {
        if self.stopped {
            return LoopControl::Stop;
        }
        for _ in 0..self.clock.advance(timestamp_ms) {
            self.session.tick();
        }
        self.dispatch_events();
        render_frame(&self.session, surface);
        LoopControl::Continue
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::StateChanged(state) => self.scores.on_state_changed(state),
                SessionEvent::ScoreChanged(score) => self.scores.on_score_changed(score),
                SessionEvent::ThemeChanged(theme) => self.scores.on_theme_changed(theme),
                SessionEvent::GameOver { final_score, new_best } => {
                    if new_best {
                        self.store.set_best_score(final_score);
                        self.scores.on_best_score(final_score);
                    }
                    self.scores.on_game_over(final_score);
                }
            }
        }
    }
}
