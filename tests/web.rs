// Browser-only tests for the canvas host pieces (`wasm-pack test --headless --firefox`).

#![cfg(target_arch = "wasm32")]

use fez_runner::game::BestScoreStore;
use fez_runner::logging;
use fez_runner::web::LocalStorageBestScore;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn best_score_round_trips_through_local_storage() {
    let win = web_sys::window().expect("window");
    let mut store = LocalStorageBestScore::new(&win);
    store.set_best_score(321);
    assert_eq!(store.best_score(), 321);
    let reopened = LocalStorageBestScore::new(&win);
    assert_eq!(reopened.best_score(), 321);
}

#[wasm_bindgen_test]
fn logger_can_be_initialized_twice() {
    logging::init(false);
    logging::init(true);
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    log::debug!("verbose logging on");
}
