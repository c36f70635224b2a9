//! Error types. The simulation itself never fails; these cover configuration
//! and browser initialisation only.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world must have a positive size (got {width}x{height})")]
    WorldSize { width: f64, height: f64 },
    #[error("ground line {ground_y} must lie inside the world and below the player's head")]
    GroundOutOfBounds { ground_y: f64 },
    #[error("player must have a positive size")]
    PlayerSize,
    #[error("gravity must pull downward (got {0})")]
    Gravity(f64),
    #[error("jump impulse must point upward, i.e. be negative (got {0})")]
    JumpImpulse(f64),
    #[error("fast-fall impulse must not be negative (got {0})")]
    FastFall(f64),
    #[error("initial speed {initial} must be positive and not exceed max speed {max}")]
    SpeedRange { initial: f64, max: f64 },
    #[error("speed and gap ramps must not be negative")]
    NegativeRamp,
    #[error("spawn gap range [{min}, {max}] is empty or non-positive")]
    SpawnGap { min: f64, max: f64 },
    #[error("per-obstacle award must be at least one point")]
    ZeroAward,
    #[error("distance per point must be positive (got {0})")]
    DistanceUnit(f64),
    #[error("theme threshold must be at least one point")]
    ZeroThemeThreshold,
    #[error("clock needs a positive tick length, at least one tick per frame and a frame delta cap of at least one tick")]
    Clock,
}

/// Failures while wiring the game into the page.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[cfg(feature = "serde_json")]
    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
