//! Collaborators the core reports to. The browser host implements these over
//! the DOM and `localStorage`; tests use in-memory versions.

use super::score::Theme;
use super::session::GameState;

/// Receives score and state notifications; owns all text/DOM output.
pub trait ScoreSink {
    fn on_score_changed(&mut self, score: u32);
    fn on_game_over(&mut self, final_score: u32);
    fn on_state_changed(&mut self, state: GameState);
    fn on_best_score(&mut self, _best: u32) {}
    fn on_theme_changed(&mut self, _theme: Theme) {}
}

/// Durable storage for the single best-score integer.
pub trait BestScoreStore {
    fn best_score(&self) -> u32;
    /// Fire-and-forget; writing the same value twice is harmless.
    fn set_best_score(&mut self, score: u32);
}

/// Best score that lives as long as the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryBestScore(pub u32);

impl BestScoreStore for MemoryBestScore {
    fn best_score(&self) -> u32 {
        self.0
    }

    fn set_best_score(&mut self, score: u32) {
        self.0 = score;
    }
}
