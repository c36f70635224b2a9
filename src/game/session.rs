//! One play session: owns the runner, the live obstacles, the spawner and the
//! score keeper, and steps them together.
//!
//! `tick()` does nothing unless the session is `Playing`. Collisions move the
//! session to `GameOver`; `start()` / `restart()` put every piece of session
//! state back to its initial value (the best score survives).

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::config::GameConfig;
use super::obstacle::{Obstacle, ObstacleKind};
use super::patterns::{ObstaclePattern, PATTERNS};
use super::player::Player;
use super::score::{ScoreKeeper, Theme};
use super::spawner::Spawner;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameState {
    #[default]
    Idle,
    Playing,
    GameOver,
}

/// Notifications produced by the session, drained by the frame driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    StateChanged(GameState),
    ScoreChanged(u32),
    ThemeChanged(Theme),
    GameOver { final_score: u32, new_best: bool },
}

/// Gameplay-relevant state, comparable across sessions. Leaves out the RNG
/// and spawn timer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SessionSnapshot {
    pub state: GameState,
    pub score: u32,
    pub best_score: u32,
    pub distance: f64,
    pub speed: f64,
    pub theme: Theme,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
}

pub struct Session {
    config: GameConfig,
    patterns: &'static [ObstaclePattern],
    state: GameState,
    player: Player,
    obstacles: Vec<Obstacle>,
    spawner: Spawner,
    score: ScoreKeeper,
    best_score: u32,
    impact: Option<Obstacle>,
    rng: SmallRng,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Fresh idle session, obstacle spawns seeded from entropy.
    pub fn new(config: GameConfig, best_score: u32) -> Self {
        Self::with_rng(config, PATTERNS, best_score, SmallRng::from_entropy())
    }

    /// Deterministic spawns, for tests and replays.
    pub fn with_seed(config: GameConfig, best_score: u32, seed: u64) -> Self {
        Self::with_rng(config, PATTERNS, best_score, SmallRng::seed_from_u64(seed))
    }

    /// Like [`with_seed`](Self::with_seed) with a custom pattern catalogue.
    pub fn with_patterns(
        config: GameConfig,
        patterns: &'static [ObstaclePattern],
        best_score: u32,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, patterns, best_score, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        patterns: &'static [ObstaclePattern],
        best_score: u32,
        mut rng: SmallRng,
    ) -> Self {
        let spawner = Spawner::new(&config, patterns, &mut rng);
        Self {
            config,
            patterns,
            state: GameState::Idle,
            player: Player::new(&config),
            obstacles: Vec::new(),
            spawner,
            score: ScoreKeeper::new(&config),
            best_score,
            impact: None,
            rng,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The obstacle that ended the session, kept for the game-over frame.
    pub fn impact(&self) -> Option<&Obstacle> {
        self.impact.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn distance(&self) -> f64 {
        self.score.distance()
    }

    pub fn speed(&self) -> f64 {
        self.score.speed()
    }

    pub fn theme(&self) -> Theme {
        self.score.theme()
    }

    /// Idle or GameOver → Playing. Ignored while already playing.
    pub fn start(&mut self) {
        if self.state != GameState::Playing {
            self.restart();
        }
    }

    /// Resets all session state and begins playing, from any state.
    pub fn restart(&mut self) {
        self.player = Player::new(&self.config);
        self.obstacles.clear();
        self.spawner = Spawner::new(&self.config, self.patterns, &mut self.rng);
        self.score = ScoreKeeper::new(&self.config);
        self.impact = None;
        info!("session started (best {})", self.best_score);
        self.set_state(GameState::Playing);
        self.events.push(SessionEvent::ScoreChanged(0));
        self.events.push(SessionEvent::ThemeChanged(Theme::Day));
    }

    /// Edge-triggered jump input; only meaningful while playing.
    pub fn request_jump(&mut self) -> bool {
        self.is_playing() && self.player.request_jump()
    }

    /// Level-triggered duck input; only meaningful while playing.
    pub fn set_ducking(&mut self, held: bool) {
        if self.is_playing() {
            self.player.set_ducking(held);
        }
    }

    /// Places an obstacle at the right edge right away, outside the spawn
    /// timer. Used for scripted openings and tests.
    pub fn inject_obstacle(&mut self, kind: ObstacleKind) {
        self.obstacles.push(Obstacle::new(kind, self.config.world.width, self.config.world.ground_y));
    }

    /// One simulation step. A no-op outside `Playing`.
    pub fn tick(&mut self) {
        if !self.is_playing() {
            return;
        }
        let speed = self.score.speed();

        self.player.step();
        self.spawner.advance(&mut self.obstacles, speed);

        if let Some(hit) = first_collision(&self.player, &self.obstacles) {
            self.impact = Some(self.obstacles.remove(hit));
            self.game_over();
            return;
        }

        let update = self.score.on_tick(self.player.x(), &mut self.obstacles);
        if update.score_changed {
            self.events.push(SessionEvent::ScoreChanged(self.score.score()));
        }
        if update.theme_changed {
            debug!("theme is now {:?}", self.score.theme());
            self.events.push(SessionEvent::ThemeChanged(self.score.theme()));
        }

        self.spawner.retire(&mut self.obstacles);
        self.spawner.maybe_spawn(&mut self.obstacles, speed, self.score.speed(), &mut self.rng);
    }

    /// Takes the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            score: self.score.score(),
            best_score: self.best_score,
            distance: self.score.distance(),
            speed: self.score.speed(),
            theme: self.score.theme(),
            player: self.player.clone(),
            obstacles: self.obstacles.clone(),
        }
    }

    fn game_over(&mut self) {
        let final_score = self.score.score();
        let new_best = final_score > self.best_score;
        if new_best {
            self.best_score = final_score;
        }
        info!("game over: score {final_score}, best {}", self.best_score);
        self.set_state(GameState::GameOver);
        self.events.push(SessionEvent::GameOver { final_score, new_best });
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            self.state = state;
            self.events.push(SessionEvent::StateChanged(state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::patterns::HIGH_BIRD_ALTITUDE;
    use crate::game::player::PlayerState;

    fn quiet_config() -> GameConfig {
        let mut cfg = GameConfig::default();
        cfg.spawn.min_gap = 1.0e9;
        cfg.spawn.max_gap = 1.0e9;
        cfg
    }

    #[test]
    fn idle_ticks_are_inert() {
        let mut s = Session::with_seed(GameConfig::default(), 0, 1);
        let before = s.snapshot();
        for _ in 0..100 {
            s.tick();
        }
        assert_eq!(s.snapshot(), before);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn start_emits_state_and_reset_events() {
        let mut s = Session::with_seed(GameConfig::default(), 3, 1);
        s.start();
        let events = s.drain_events();
        assert_eq!(events[0], SessionEvent::StateChanged(GameState::Playing));
        assert!(events.contains(&SessionEvent::ScoreChanged(0)));
        // A second start while playing changes nothing.
        s.start();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn input_is_ignored_when_not_playing() {
        let mut s = Session::with_seed(GameConfig::default(), 0, 1);
        assert!(!s.request_jump());
        s.set_ducking(true);
        assert_eq!(s.player().state(), PlayerState::Grounded);
    }

    #[test]
    fn collision_ends_session_and_keeps_impact() {
        let mut s = Session::with_seed(quiet_config(), 0, 1);
        s.start();
        s.inject_obstacle(ObstacleKind::Cactus);
        let mut ticks = 0;
        while s.is_playing() && ticks < 1000 {
            s.tick();
            ticks += 1;
        }
        assert_eq!(s.state(), GameState::GameOver);
        assert!(s.obstacles().is_empty());
        assert!(matches!(s.impact().map(Obstacle::kind), Some(ObstacleKind::Cactus)));

        // Frozen after game over.
        let frozen = s.snapshot();
        s.request_jump();
        s.tick();
        assert_eq!(s.snapshot(), frozen);
    }

    #[test]
    fn game_over_updates_best_only_when_beaten() {
        let mut s = Session::with_seed(quiet_config(), 5, 1);
        s.start();
        s.inject_obstacle(ObstacleKind::Rock);
        while s.is_playing() {
            s.tick();
        }
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::GameOver { final_score: 0, new_best: false }));
        assert_eq!(s.best_score(), 5);
    }

    #[test]
    fn high_bird_scores_without_collision() {
        let mut s = Session::with_seed(quiet_config(), 0, 1);
        s.start();
        s.inject_obstacle(ObstacleKind::Bird { altitude: HIGH_BIRD_ALTITUDE });
        for _ in 0..200 {
            s.tick();
        }
        assert!(s.is_playing());
        assert_eq!(s.score(), 10);
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn spawner_fills_the_world_while_playing() {
        let mut s = Session::with_seed(GameConfig::default(), 0, 42);
        s.start();
        let mut seen = 0;
        for _ in 0..200 {
            s.tick();
            seen = seen.max(s.obstacles().len());
            if !s.is_playing() {
                break;
            }
        }
        assert!(seen > 0);
    }
}
