//! Distance-driven obstacle spawning.
//!
//! The spawner keeps no obstacles of its own: it advances, retires and appends
//! to whichever list the session hands it. A new pattern is placed once the
//! world has scrolled a randomly drawn gap since the previous one; the gap
//! range tightens as the scroll speed grows.

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use super::config::{GameConfig, SpawnConfig};
use super::obstacle::Obstacle;
use super::patterns::ObstaclePattern;

#[derive(Clone, Debug)]
pub struct Spawner {
    patterns: &'static [ObstaclePattern],
    config: SpawnConfig,
    initial_speed: f64,
    world_width: f64,
    ground_y: f64,
    distance_since_spawn: f64,
    next_gap: f64,
}

impl Spawner {
    pub fn new<R: Rng>(config: &GameConfig, patterns: &'static [ObstaclePattern], rng: &mut R) -> Self {
        let mut spawner = Self {
            patterns,
            config: config.spawn,
            initial_speed: config.difficulty.initial_speed,
            world_width: config.world.width,
            ground_y: config.world.ground_y,
            distance_since_spawn: 0.0,
            next_gap: 0.0,
        };
        spawner.next_gap = spawner.draw_gap(config.difficulty.initial_speed, rng);
        spawner
    }

    pub fn distance_since_spawn(&self) -> f64 {
        self.distance_since_spawn
    }

    pub fn next_gap(&self) -> f64 {
        self.next_gap
    }

    /// `[min, max]` of the spawn gap at `scroll_speed`.
    ///
    /// The floor is the larger of `min_gap` and the distance covered in
    /// `min_gap_ticks` at this speed, so a jump always fits between patterns.
    pub fn gap_range(&self, scroll_speed: f64) -> (f64, f64) {
        let lower = self.config.min_gap.max(scroll_speed * self.config.min_gap_ticks);
        let narrowed = self.config.max_gap
            - (scroll_speed - self.initial_speed).max(0.0) * self.config.gap_narrowing;
        (lower, narrowed.max(lower))
    }

    pub fn eligible(&self, scroll_speed: f64) -> impl Iterator<Item = &'static ObstaclePattern> + use<> {
        self.patterns.iter().filter(move |p| p.is_eligible(scroll_speed))
    }

    /// Scrolls every obstacle one tick.
    pub fn advance(&self, obstacles: &mut [Obstacle], scroll_speed: f64) {
        for obstacle in obstacles.iter_mut() {
            obstacle.advance(scroll_speed);
        }
    }

    /// Drops obstacles that have left the screen; returns how many.
    pub fn retire(&self, obstacles: &mut Vec<Obstacle>) -> usize {
        let before = obstacles.len();
        obstacles.retain(|o| !o.is_offscreen());
        before - obstacles.len()
    }

    /// Adds `scrolled` to the distance since the last spawn and, once the drawn
    /// gap is reached, appends one eligible pattern at the right edge.
    ///
    /// With nothing eligible the attempt is skipped and retried next tick.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        obstacles: &mut Vec<Obstacle>,
        scrolled: f64,
        scroll_speed: f64,
        rng: &mut R,
    ) -> Option<&'static ObstaclePattern> {
        self.distance_since_spawn += scrolled;
        if self.distance_since_spawn < self.next_gap {
            return None;
        }

        let eligible: Vec<&'static ObstaclePattern> = self.eligible(scroll_speed).collect();
        let Some(&pattern) = eligible.choose(rng) else {
            warn!("no obstacle pattern eligible at speed {scroll_speed:.2}; skipping spawn");
            return None;
        };

        self.place(obstacles, pattern);
        self.distance_since_spawn = 0.0;
        self.next_gap = self.draw_gap(scroll_speed, rng) + pattern.span();
        debug!(
            "spawned '{}' at speed {:.2}, next gap {:.0}",
            pattern.name, scroll_speed, self.next_gap
        );
        Some(pattern)
    }

    /// Appends every member of `pattern` at the right edge.
    pub fn place(&self, obstacles: &mut Vec<Obstacle>, pattern: &ObstaclePattern) {
        obstacles.extend(
            pattern
                .members
                .iter()
                .map(|m| Obstacle::new(m.kind, self.world_width + m.offset, self.ground_y)),
        );
    }

    fn draw_gap<R: Rng>(&self, scroll_speed: f64, rng: &mut R) -> f64 {
        let (lower, upper) = self.gap_range(scroll_speed);
        rng.gen_range(lower..=upper)
    }
}
