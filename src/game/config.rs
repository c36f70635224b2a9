//! Tunable game parameters.
//!
//! All distances are in canvas pixels and all rates are per simulation tick
//! (one nominal 60 Hz frame). `GameConfig::default()` is the tuned game; tests
//! and hosts may tweak individual sections and call [`GameConfig::validated`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// World geometry and the player's fixed placement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// y of the ground line (origin top-left, y grows downward).
    pub ground_y: f64,
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 250.0,
            ground_y: 210.0,
            player_x: 50.0,
            player_width: 40.0,
            player_height: 60.0,
        }
    }
}

/// Vertical physics of the runner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PhysicsConfig {
    pub gravity: f64,
    /// Negative: up is towards y = 0.
    pub jump_impulse: f64,
    /// Added once per jump when duck is pressed mid-air.
    pub fast_fall_impulse: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: 0.6, jump_impulse: -11.0, fast_fall_impulse: 4.0 }
    }
}

/// Scroll speed ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DifficultyConfig {
    pub initial_speed: f64,
    pub max_speed: f64,
    pub speed_per_tick: f64,
    /// Every `milestone_points` of score adds `milestone_bonus` to the speed.
    pub milestone_points: u32,
    pub milestone_bonus: f64,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_speed: 5.0,
            max_speed: 13.0,
            speed_per_tick: 0.002,
            milestone_points: 100,
            milestone_bonus: 0.5,
        }
    }
}

/// Distance-based spawn timer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SpawnConfig {
    pub min_gap: f64,
    pub max_gap: f64,
    /// How much `max_gap` shrinks per unit of speed above the initial speed.
    pub gap_narrowing: f64,
    /// Lower bound on the gap expressed in ticks of travel at the current speed.
    pub min_gap_ticks: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { min_gap: 300.0, max_gap: 650.0, gap_narrowing: 25.0, min_gap_ticks: 45.0 }
    }
}

/// How points are earned. Exactly one policy is active per session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScoringPolicy {
    /// Fixed award for each obstacle that fully passes the player.
    PerObstacle { award: u32 },
    /// One point per `units_per_point` pixels scrolled.
    PerDistance { units_per_point: f64 },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::PerObstacle { award: 10 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScoringConfig {
    pub policy: ScoringPolicy,
    /// Day/night flips each time the score crosses a multiple of this.
    pub theme_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { policy: ScoringPolicy::default(), theme_threshold: 100 }
    }
}

/// Frame-to-tick conversion used by [`crate::game::FrameClock`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ClockConfig {
    pub tick_ms: f64,
    pub max_ticks_per_frame: u32,
    pub max_frame_delta_ms: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { tick_ms: 1000.0 / 60.0, max_ticks_per_frame: 5, max_frame_delta_ms: 250.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GameConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    pub scoring: ScoringConfig,
    pub clock: ClockConfig,
}

impl GameConfig {
    /// Rejects configurations the simulation cannot run sensibly.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let w = &self.world;
        if !(w.width > 0.0 && w.height > 0.0) {
            return Err(ConfigError::WorldSize { width: w.width, height: w.height });
        }
        if !(w.ground_y > w.player_height && w.ground_y <= w.height) {
            return Err(ConfigError::GroundOutOfBounds { ground_y: w.ground_y });
        }
        if !(w.player_width > 0.0 && w.player_height > 0.0) {
            return Err(ConfigError::PlayerSize);
        }
        let p = &self.physics;
        if !(p.gravity > 0.0) {
            return Err(ConfigError::Gravity(p.gravity));
        }
        if !(p.jump_impulse < 0.0) {
            return Err(ConfigError::JumpImpulse(p.jump_impulse));
        }
        if p.fast_fall_impulse < 0.0 {
            return Err(ConfigError::FastFall(p.fast_fall_impulse));
        }
        let d = &self.difficulty;
        if !(d.initial_speed > 0.0 && d.initial_speed <= d.max_speed) {
            return Err(ConfigError::SpeedRange { initial: d.initial_speed, max: d.max_speed });
        }
        if d.speed_per_tick < 0.0 || d.milestone_bonus < 0.0 {
            return Err(ConfigError::NegativeRamp);
        }
        let s = &self.spawn;
        if !(s.min_gap > 0.0 && s.min_gap <= s.max_gap) {
            return Err(ConfigError::SpawnGap { min: s.min_gap, max: s.max_gap });
        }
        if s.gap_narrowing < 0.0 || s.min_gap_ticks < 0.0 {
            return Err(ConfigError::NegativeRamp);
        }
        match self.scoring.policy {
            ScoringPolicy::PerObstacle { award: 0 } => return Err(ConfigError::ZeroAward),
            ScoringPolicy::PerDistance { units_per_point } if !(units_per_point > 0.0) => {
                return Err(ConfigError::DistanceUnit(units_per_point));
            }
            _ => {}
        }
        if self.scoring.theme_threshold == 0 {
            return Err(ConfigError::ZeroThemeThreshold);
        }
        let c = &self.clock;
        if !(c.tick_ms > 0.0) || c.max_ticks_per_frame == 0 || !(c.max_frame_delta_ms >= c.tick_ms) {
            return Err(ConfigError::Clock);
        }
        Ok(self)
    }

    /// y of the player's top edge when standing on the ground.
    pub fn rest_y(&self) -> f64 {
        self.world.ground_y - self.world.player_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validated().is_ok());
    }

    #[test]
    fn rest_y_sits_on_ground() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.rest_y() + cfg.world.player_height, cfg.world.ground_y);
    }

    #[test]
    fn rejects_upward_gravity_and_downward_jump() {
        let mut cfg = GameConfig::default();
        cfg.physics.gravity = -0.5;
        assert!(matches!(cfg.validated(), Err(ConfigError::Gravity(_))));

        let mut cfg = GameConfig::default();
        cfg.physics.jump_impulse = 3.0;
        assert!(matches!(cfg.validated(), Err(ConfigError::JumpImpulse(_))));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut cfg = GameConfig::default();
        cfg.spawn.min_gap = 700.0;
        assert!(matches!(cfg.validated(), Err(ConfigError::SpawnGap { .. })));

        let mut cfg = GameConfig::default();
        cfg.difficulty.initial_speed = 20.0;
        assert!(matches!(cfg.validated(), Err(ConfigError::SpeedRange { .. })));
    }

    #[test]
    fn rejects_degenerate_scoring() {
        let mut cfg = GameConfig::default();
        cfg.scoring.policy = ScoringPolicy::PerObstacle { award: 0 };
        assert!(matches!(cfg.validated(), Err(ConfigError::ZeroAward)));

        cfg.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 0.0 };
        assert!(matches!(cfg.validated(), Err(ConfigError::DistanceUnit(_))));
    }

    #[test]
    fn rejects_frame_delta_cap_below_one_tick() {
        let mut cfg = GameConfig::default();
        cfg.clock.max_frame_delta_ms = -1.0;
        assert_eq!(cfg.validated(), Err(ConfigError::Clock));

        cfg.clock.max_frame_delta_ms = cfg.clock.tick_ms / 2.0;
        assert_eq!(cfg.validated(), Err(ConfigError::Clock));

        cfg.clock.max_frame_delta_ms = f64::NAN;
        assert_eq!(cfg.validated(), Err(ConfigError::Clock));
    }
}
