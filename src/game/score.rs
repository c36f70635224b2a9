//! Score, distance, scroll speed and the cosmetic day/night theme.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::{DifficultyConfig, GameConfig, ScoringConfig, ScoringPolicy};
use super::obstacle::Obstacle;

/// Purely cosmetic; read by the render step only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    fn for_score(score: u32, threshold: u32) -> Self {
        match score.checked_div(threshold) {
            Some(band) if band % 2 == 1 => Theme::Night,
            _ => Theme::Day,
        }
    }
}

/// What changed during one [`ScoreKeeper::on_tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score_changed: bool,
    pub theme_changed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreKeeper {
    score: u32,
    distance: f64,
    speed: f64,
    theme: Theme,
    difficulty: DifficultyConfig,
    scoring: ScoringConfig,
}

impl ScoreKeeper {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            distance: 0.0,
            speed: config.difficulty.initial_speed,
            theme: Theme::Day,
            difficulty: config.difficulty,
            scoring: config.scoring,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Accounts for one tick scrolled at the current speed, awards points,
    /// then ramps the speed for the next tick.
    ///
    /// Under [`ScoringPolicy::PerObstacle`] an obstacle pays out the first
    /// tick its right edge is left of `player_x`, and never again.
    pub fn on_tick(&mut self, player_x: f64, obstacles: &mut [Obstacle]) -> ScoreUpdate {
        let before = self.score;
        self.distance += self.speed;

        match self.scoring.policy {
            ScoringPolicy::PerObstacle { award } => {
                for obstacle in obstacles.iter_mut().filter(|o| !o.scored) {
                    if obstacle.x() + obstacle.width() < player_x {
                        obstacle.scored = true;
                        self.score = self.score.saturating_add(award);
                    }
                }
            }
            ScoringPolicy::PerDistance { units_per_point } => {
                let earned = (self.distance / units_per_point).floor();
                self.score = if earned >= f64::from(u32::MAX) { u32::MAX } else { earned as u32 };
            }
        }

        let mut bonus = 0.0;
        if let Some(step) = std::num::NonZeroU32::new(self.difficulty.milestone_points) {
            let crossed = self.score / step - before / step;
            bonus = f64::from(crossed) * self.difficulty.milestone_bonus;
        }
        self.speed = (self.speed + self.difficulty.speed_per_tick + bonus).min(self.difficulty.max_speed);

        let theme = Theme::for_score(self.score, self.scoring.theme_threshold);
        let theme_changed = theme != self.theme;
        self.theme = theme;

        ScoreUpdate { score_changed: self.score != before, theme_changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::obstacle::ObstacleKind;
    use approx::assert_relative_eq;

    fn keeper(tweak: impl FnOnce(&mut GameConfig)) -> ScoreKeeper {
        let mut cfg = GameConfig::default();
        tweak(&mut cfg);
        ScoreKeeper::new(&cfg)
    }

    #[test]
    fn theme_alternates_per_band_and_stays_day_without_threshold() {
        assert_eq!(Theme::for_score(99, 100), Theme::Day);
        assert_eq!(Theme::for_score(100, 100), Theme::Night);
        assert_eq!(Theme::for_score(250, 100), Theme::Day);
        assert_eq!(Theme::for_score(40, 0), Theme::Day);

        let mut k = keeper(|c| c.scoring.theme_threshold = 0);
        let mut obstacles = vec![Obstacle::new(ObstacleKind::Rock, 0.0, 210.0)];
        k.on_tick(50.0, &mut obstacles);
        assert_eq!(k.score(), 10);
        assert_eq!(k.theme(), Theme::Day);
    }

    #[test]
    fn passing_obstacle_scores_exactly_once_even_when_lingering() {
        let mut k = keeper(|c| {
            c.difficulty.initial_speed = 0.01;
            c.difficulty.speed_per_tick = 0.0;
        });
        // Right edge sits just left of the player and stays there.
        let mut obstacles = vec![Obstacle::new(ObstacleKind::Rock, 19.99, 210.0)];
        let first = k.on_tick(50.0, &mut obstacles);
        assert!(first.score_changed);
        assert_eq!(k.score(), 10);
        for _ in 0..500 {
            let update = k.on_tick(50.0, &mut obstacles);
            assert!(!update.score_changed);
        }
        assert_eq!(k.score(), 10);
        assert!(obstacles[0].is_scored());
    }

    #[test]
    fn obstacle_still_overlapping_player_column_does_not_score() {
        let mut k = keeper(|_| {});
        let mut obstacles = vec![Obstacle::new(ObstacleKind::Rock, 20.0, 210.0)];
        k.on_tick(50.0, &mut obstacles);
        assert_eq!(k.score(), 0);
    }

    #[test]
    fn distance_policy_matches_closed_form() {
        let mut k = keeper(|c| {
            c.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 40.0 };
            c.difficulty.speed_per_tick = 0.0;
            c.difficulty.milestone_bonus = 0.0;
        });
        for _ in 0..100 {
            k.on_tick(50.0, &mut []);
        }
        assert_relative_eq!(k.distance(), 500.0);
        assert_eq!(k.score(), 12);
    }

    #[test]
    fn speed_is_monotone_and_capped() {
        let mut k = keeper(|c| c.difficulty.speed_per_tick = 0.05);
        let mut last = k.speed();
        for _ in 0..1000 {
            k.on_tick(50.0, &mut []);
            assert!(k.speed() >= last);
            last = k.speed();
        }
        assert_relative_eq!(k.speed(), 13.0);
    }

    #[test]
    fn milestone_bumps_speed() {
        let mut k = keeper(|c| {
            c.difficulty.speed_per_tick = 0.0;
            c.difficulty.milestone_points = 20;
        });
        let mut obstacles: Vec<Obstacle> =
            (0..2).map(|_| Obstacle::new(ObstacleKind::Rock, -5.0, 210.0)).collect();
        k.on_tick(50.0, &mut obstacles);
        assert_eq!(k.score(), 20);
        assert_relative_eq!(k.speed(), 5.5);
    }

    #[test]
    fn theme_flips_at_each_threshold_multiple() {
        let mut k = keeper(|c| {
            c.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 1.0 };
            c.scoring.theme_threshold = 50;
            c.difficulty.speed_per_tick = 0.0;
            c.difficulty.milestone_bonus = 0.0;
        });
        let mut flips = 0;
        for _ in 0..40 {
            if k.on_tick(50.0, &mut []).theme_changed {
                flips += 1;
            }
        }
        // 40 ticks * 5 px = 200 points: crossings at 50, 100, 150, 200.
        assert_eq!(flips, 4);
        assert_eq!(k.theme(), Theme::Day);
    }

    #[test]
    fn theme_never_touches_speed() {
        let ramp = |threshold| {
            let mut k = keeper(|c| {
                c.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 1.0 };
                c.scoring.theme_threshold = threshold;
            });
            for _ in 0..300 {
                k.on_tick(50.0, &mut []);
            }
            k.speed()
        };
        assert_relative_eq!(ramp(7), ramp(1000));
    }
}
