//! Fez Runner core crate.
//!
//! A side-scrolling runner: the player jumps and ducks past procedurally
//! spawned ground and airborne obstacles while the scroll speed ramps up.
//! The simulation lives in [`game`] and runs natively (that is how the tests
//! drive it); [`web`] hosts it on an HTML canvas via `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod game;
pub mod logging;
pub mod render;
pub mod web;

pub use error::{ConfigError, HostError};
pub use game::{Game, GameConfig, GameState, Session};
pub use render::{RenderSurface, render_frame};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(false);
}

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

/// Starts the game with the default tuning on `#gameCanvas`.
#[wasm_bindgen]
pub fn start_game() -> Result<web::GameHandle, JsValue> {
    Ok(web::launch(GameConfig::default())?)
}

/// Starts the game with a JSON configuration; omitted fields keep defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<web::GameHandle, JsValue> {
    let config: GameConfig = serde_json::from_str(json).map_err(HostError::from)?;
    Ok(web::launch(config)?)
}

/// Turns on debug logging (spawns, theme flips) in the console.
#[wasm_bindgen]
pub fn set_verbose_logging(verbose: bool) {
    logging::init(verbose);
}
