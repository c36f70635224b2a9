//! Hitbox overlap tests. Pure functions over current entity state.

use super::geometry::Rect;
use super::obstacle::Obstacle;
use super::player::Player;

/// Standard AABB overlap of two world-space hitboxes.
pub fn hits(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Whether the player's current (state-dependent) hitbox touches the obstacle's.
pub fn check_collision(player: &Player, obstacle: &Obstacle) -> bool {
    hits(&player.world_hitbox(), &obstacle.world_hitbox())
}

/// Index of the first obstacle the player is touching, if any. Stops at the
/// first hit.
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let hitbox = player.world_hitbox();
    obstacles.iter().position(|o| hits(&hitbox, &o.world_hitbox()))
}
