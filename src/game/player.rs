//! Runner physics and the Grounded / Airborne / Ducking state machine.
//!
//! Input only records intent ([`Player::request_jump`], [`Player::set_ducking`]);
//! [`Player::step`] is the single place where a jump is consumed, so a burst of
//! key-repeat events between two ticks still yields one jump.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::{GameConfig, PhysicsConfig};
use super::geometry::Rect;

/// Ducking pose relative to the standing size.
const DUCK_WIDTH_FACTOR: f64 = 1.4;
const DUCK_HEIGHT_FACTOR: f64 = 0.55;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlayerState {
    Grounded,
    /// `fast_fall_used` is set once the mid-air duck impulse has been applied
    /// for this jump.
    Airborne { fast_fall_used: bool },
    Ducking,
}

impl PlayerState {
    pub fn on_ground(self) -> bool {
        !matches!(self, PlayerState::Airborne { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    x: f64,
    y: f64,
    vy: f64,
    width: f64,
    height: f64,
    ground_y: f64,
    state: PlayerState,
    physics: PhysicsConfig,
    pending_jump: bool,
    duck_held: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.world.player_x,
            y: config.rest_y(),
            vy: 0.0,
            width: config.world.player_width,
            height: config.world.player_height,
            ground_y: config.world.ground_y,
            state: PlayerState::Grounded,
            physics: config.physics,
            pending_jump: false,
            duck_held: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn vertical_velocity(&self) -> f64 {
        self.vy
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn has_pending_jump(&self) -> bool {
        self.pending_jump
    }

    /// y of the top edge while standing on the ground.
    pub fn rest_y(&self) -> f64 {
        self.ground_y - self.height
    }

    /// Queues a jump. Ignored (returns `false`) while airborne; repeated calls
    /// before the next [`step`](Self::step) collapse into one jump.
    pub fn request_jump(&mut self) -> bool {
        if self.state.on_ground() {
            self.pending_jump = true;
        }
        self.pending_jump
    }

    /// Level-triggered duck input.
    ///
    /// On the ground this toggles between Grounded and Ducking. In the air the
    /// first press of a jump adds a single fast-fall impulse; holding (key
    /// repeat) or re-pressing does nothing more until the next jump.
    pub fn set_ducking(&mut self, held: bool) {
        let pressed = held && !self.duck_held;
        self.duck_held = held;
        match (self.state, held) {
            (PlayerState::Grounded, true) => self.state = PlayerState::Ducking,
            (PlayerState::Ducking, false) => self.state = PlayerState::Grounded,
            (PlayerState::Airborne { fast_fall_used: false }, true) if pressed => {
                self.vy += self.physics.fast_fall_impulse;
                self.state = PlayerState::Airborne { fast_fall_used: true };
            }
            _ => {}
        }
    }

    /// One simulation tick: integrate, resolve ground contact, consume a
    /// pending jump.
    pub fn step(&mut self) {
        if let PlayerState::Airborne { .. } = self.state {
            self.vy += self.physics.gravity;
            self.y += self.vy;
        }

        let rest = self.rest_y();
        if self.y >= rest {
            self.y = rest;
            self.vy = 0.0;
            if !self.state.on_ground() {
                self.state = if self.duck_held { PlayerState::Ducking } else { PlayerState::Grounded };
            }
        }

        if self.pending_jump && self.state.on_ground() {
            self.vy = self.physics.jump_impulse;
            self.state = PlayerState::Airborne { fast_fall_used: false };
        }
        self.pending_jump = false;
    }

    /// Collision box relative to `(x, y)`, chosen by the current state.
    ///
    /// The ducking box is shorter, a little wider, and bottom-aligned with the
    /// running box so it only drops the head, never the feet.
    pub fn hitbox(&self) -> Rect {
        match self.state {
            PlayerState::Ducking => {
                let (dw, dh) = self.duck_size();
                Rect::new(4.0, self.height - dh + 3.0, dw - 8.0, dh - 3.0)
            }
            PlayerState::Grounded | PlayerState::Airborne { .. } => {
                Rect::new(6.0, 4.0, self.width - 12.0, self.height - 4.0)
            }
        }
    }

    pub fn world_hitbox(&self) -> Rect {
        self.hitbox().translate(self.x, self.y)
    }

    /// Drawn bounds in world space.
    pub fn bounds(&self) -> Rect {
        match self.state {
            PlayerState::Ducking => {
                let (dw, dh) = self.duck_size();
                Rect::new(self.x, self.y + self.height - dh, dw, dh)
            }
            PlayerState::Grounded | PlayerState::Airborne { .. } => {
                Rect::new(self.x, self.y, self.width, self.height)
            }
        }
    }

    fn duck_size(&self) -> (f64, f64) {
        (self.width * DUCK_WIDTH_FACTOR, self.height * DUCK_HEIGHT_FACTOR)
    }

    #[cfg(test)]
    pub(crate) fn force_airborne(&mut self, y: f64, vy: f64) {
        self.y = y;
        self.vy = vy;
        self.state = PlayerState::Airborne { fast_fall_used: false };
    }
}
