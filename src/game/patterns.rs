//! Obstacle pattern catalogue.
//!
//! Each pattern becomes eligible once the scroll speed reaches its `min_speed`;
//! the first entries have `min_speed = 0.0` so something is always eligible.

use super::obstacle::ObstacleKind;

/// One obstacle in a pattern, `offset` px to the right of the spawn edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternMember {
    pub kind: ObstacleKind,
    pub offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstaclePattern {
    pub name: &'static str,
    pub min_speed: f64,
    pub members: &'static [PatternMember],
}

impl ObstaclePattern {
    pub fn is_eligible(&self, scroll_speed: f64) -> bool {
        self.min_speed <= scroll_speed
    }

    /// Horizontal extent of the group from the spawn edge.
    pub fn span(&self) -> f64 {
        self.members
            .iter()
            .map(|m| m.offset + m.kind.size().0)
            .fold(0.0, f64::max)
    }
}

const fn single(kind: ObstacleKind) -> PatternMember {
    PatternMember { kind, offset: 0.0 }
}

/// Bottom edge just above a standing runner's head: passes overhead unless
/// the runner is in the air.
pub const HIGH_BIRD_ALTITUDE: f64 = 64.0;
/// Bottom edge between the ducking and standing head height: duck or jump.
pub const LOW_BIRD_ALTITUDE: f64 = 36.0;

pub static PATTERNS: &[ObstaclePattern] = &[
    ObstaclePattern { name: "rock", min_speed: 0.0, members: &[single(ObstacleKind::Rock)] },
    ObstaclePattern { name: "bush", min_speed: 0.0, members: &[single(ObstacleKind::Bush)] },
    ObstaclePattern { name: "cactus", min_speed: 0.0, members: &[single(ObstacleKind::Cactus)] },
    ObstaclePattern {
        name: "low bird",
        min_speed: 6.0,
        members: &[single(ObstacleKind::Bird { altitude: LOW_BIRD_ALTITUDE })],
    },
    ObstaclePattern {
        name: "high bird",
        min_speed: 7.0,
        members: &[single(ObstacleKind::Bird { altitude: HIGH_BIRD_ALTITUDE })],
    },
    ObstaclePattern {
        name: "cactus pair",
        min_speed: 7.5,
        members: &[
            single(ObstacleKind::Cactus),
            PatternMember { kind: ObstacleKind::Cactus, offset: 26.0 },
        ],
    },
    ObstaclePattern {
        name: "swooping bird",
        min_speed: 8.5,
        members: &[single(ObstacleKind::SwoopingBird {
            altitude: 90.0,
            descent: 0.6,
            floor: LOW_BIRD_ALTITUDE,
        })],
    },
    ObstaclePattern {
        name: "rock and bird",
        min_speed: 9.5,
        members: &[
            single(ObstacleKind::Rock),
            PatternMember {
                kind: ObstacleKind::Bird { altitude: HIGH_BIRD_ALTITUDE },
                offset: 180.0,
            },
        ],
    },
    ObstaclePattern {
        name: "missile",
        min_speed: 10.5,
        members: &[single(ObstacleKind::Missile { altitude: 10.0, boost: 2.5 })],
    },
    ObstaclePattern {
        name: "cactus triple",
        min_speed: 11.5,
        members: &[
            single(ObstacleKind::Cactus),
            PatternMember { kind: ObstacleKind::Cactus, offset: 24.0 },
            PatternMember { kind: ObstacleKind::Cactus, offset: 48.0 },
        ],
    },
];
