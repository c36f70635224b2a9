//! Obstacle kinds and live obstacle state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// What an obstacle is. Airborne kinds carry their altitude: the distance from
/// the ground line up to the obstacle's bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObstacleKind {
    Rock,
    Cactus,
    Bush,
    /// Flies level at a fixed altitude.
    Bird { altitude: f64 },
    /// Loses `descent` altitude per tick until it reaches `floor`.
    SwoopingBird { altitude: f64, descent: f64, floor: f64 },
    /// Flies `boost` px/tick faster than the scroll.
    Missile { altitude: f64, boost: f64 },
}

impl ObstacleKind {
    /// Drawn size `(width, height)`.
    pub fn size(&self) -> (f64, f64) {
        match self {
            ObstacleKind::Rock => (30.0, 22.0),
            ObstacleKind::Cactus => (22.0, 46.0),
            ObstacleKind::Bush => (40.0, 26.0),
            ObstacleKind::Bird { .. } | ObstacleKind::SwoopingBird { .. } => (36.0, 20.0),
            ObstacleKind::Missile { .. } => (44.0, 14.0),
        }
    }

    /// Collision box relative to the drawn top-left corner, inset so grazes
    /// forgive a pixel or two.
    pub fn hitbox(&self) -> Rect {
        match self {
            ObstacleKind::Rock => Rect::new(3.0, 4.0, 24.0, 18.0),
            ObstacleKind::Cactus => Rect::new(3.0, 2.0, 16.0, 44.0),
            ObstacleKind::Bush => Rect::new(4.0, 6.0, 32.0, 20.0),
            ObstacleKind::Bird { .. } | ObstacleKind::SwoopingBird { .. } => {
                Rect::new(4.0, 2.0, 28.0, 16.0)
            }
            ObstacleKind::Missile { .. } => Rect::new(2.0, 2.0, 40.0, 10.0),
        }
    }

    pub fn altitude(&self) -> f64 {
        match self {
            ObstacleKind::Rock | ObstacleKind::Cactus | ObstacleKind::Bush => 0.0,
            ObstacleKind::Bird { altitude }
            | ObstacleKind::SwoopingBird { altitude, .. }
            | ObstacleKind::Missile { altitude, .. } => *altitude,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.altitude() > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    kind: ObstacleKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Set once the obstacle has fully passed the player.
    pub(crate) scored: bool,
}

impl Obstacle {
    /// Places `kind` with its left edge at `x`, resting at its altitude above
    /// `ground_y`.
    pub fn new(kind: ObstacleKind, x: f64, ground_y: f64) -> Self {
        let (width, height) = kind.size();
        Self { kind, x, y: ground_y - kind.altitude() - height, width, height, scored: false }
    }

    pub fn kind(&self) -> &ObstacleKind {
        &self.kind
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn world_hitbox(&self) -> Rect {
        self.kind.hitbox().translate(self.x, self.y)
    }

    /// Entirely past the left edge of the world.
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Moves one tick to the left and applies the kind's own motion.
    pub fn advance(&mut self, scroll_speed: f64) {
        self.x -= scroll_speed;
        match &mut self.kind {
            ObstacleKind::Missile { boost, .. } => self.x -= *boost,
            ObstacleKind::SwoopingBird { altitude, descent, floor } => {
                let next = (*altitude - *descent).max(*floor);
                self.y += *altitude - next;
                *altitude = next;
            }
            ObstacleKind::Rock
            | ObstacleKind::Cactus
            | ObstacleKind::Bush
            | ObstacleKind::Bird { .. } => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn set_x(&mut self, x: f64) {
        self.x = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GROUND: f64 = 210.0;

    #[test]
    fn ground_kinds_sit_on_the_ground() {
        for kind in [ObstacleKind::Rock, ObstacleKind::Cactus, ObstacleKind::Bush] {
            let o = Obstacle::new(kind, 800.0, GROUND);
            assert_relative_eq!(o.bounds().bottom(), GROUND);
            assert!(!kind.is_airborne());
        }
    }

    #[test]
    fn hitboxes_are_inside_drawn_bounds() {
        let kinds = [
            ObstacleKind::Rock,
            ObstacleKind::Cactus,
            ObstacleKind::Bush,
            ObstacleKind::Bird { altitude: 40.0 },
            ObstacleKind::SwoopingBird { altitude: 90.0, descent: 1.0, floor: 30.0 },
            ObstacleKind::Missile { altitude: 10.0, boost: 2.0 },
        ];
        for kind in kinds {
            let o = Obstacle::new(kind, 100.0, GROUND);
            let hb = o.world_hitbox();
            let b = o.bounds();
            assert!(hb.x >= b.x && hb.right() <= b.right(), "{kind:?}");
            assert!(hb.y >= b.y && hb.bottom() <= b.bottom(), "{kind:?}");
        }
    }

    #[test]
    fn bird_flies_at_altitude() {
        let o = Obstacle::new(ObstacleKind::Bird { altitude: 36.0 }, 0.0, GROUND);
        assert_relative_eq!(o.bounds().bottom(), GROUND - 36.0);
    }

    #[test]
    fn swooping_bird_descends_to_floor_and_stops() {
        let kind = ObstacleKind::SwoopingBird { altitude: 50.0, descent: 4.0, floor: 36.0 };
        let mut o = Obstacle::new(kind, 800.0, GROUND);
        o.advance(5.0);
        assert_relative_eq!(o.bounds().bottom(), GROUND - 46.0);
        for _ in 0..10 {
            o.advance(5.0);
        }
        assert_relative_eq!(o.bounds().bottom(), GROUND - 36.0);
        assert_relative_eq!(o.kind().altitude(), 36.0);
        assert_relative_eq!(o.x(), 800.0 - 55.0);
    }

    #[test]
    fn missile_outruns_the_scroll() {
        let mut o = Obstacle::new(ObstacleKind::Missile { altitude: 10.0, boost: 3.0 }, 500.0, GROUND);
        o.advance(5.0);
        assert_relative_eq!(o.x(), 492.0);
    }

    #[test]
    fn offscreen_only_once_fully_past_left_edge() {
        let mut o = Obstacle::new(ObstacleKind::Rock, 0.0, GROUND);
        o.set_x(-29.0);
        assert!(!o.is_offscreen());
        o.set_x(-30.5);
        assert!(o.is_offscreen());
    }
}
