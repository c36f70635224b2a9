//! Simulation core of the runner.
//!
//! Nothing in here touches the browser: the session is stepped by calling
//! [`Session::tick`] (or [`Game::frame`] with synthetic timestamps), which is
//! how the tests drive it.
//!
//! Per tick, in order: runner physics, obstacle scroll, collision, scoring
//! and speed ramp, retirement of off-screen obstacles, spawning.

mod clock;
mod collision;
mod config;
mod driver;
mod geometry;
mod obstacle;
mod patterns;
mod player;
mod score;
mod session;
mod sinks;
mod spawner;

pub use clock::FrameClock;
pub use collision::{check_collision, first_collision, hits};
pub use config::{
    ClockConfig, DifficultyConfig, GameConfig, PhysicsConfig, ScoringConfig, ScoringPolicy, SpawnConfig,
    WorldConfig,
};
pub use driver::{Game, LoopControl};
pub use geometry::Rect;
pub use obstacle::{Obstacle, ObstacleKind};
pub use patterns::{HIGH_BIRD_ALTITUDE, LOW_BIRD_ALTITUDE, ObstaclePattern, PATTERNS, PatternMember};
pub use player::{Player, PlayerState};
pub use score::{ScoreKeeper, ScoreUpdate, Theme};
pub use session::{GameState, Session, SessionEvent, SessionSnapshot};
pub use sinks::{BestScoreStore, MemoryBestScore, ScoreSink};
pub use spawner::Spawner;
