//! Guess Game - a browser number-guessing game
//!
//! Core modules:
//! - `round`: Round state machine and guess evaluation (pure, seeded RNG)
//! - `highscores`: Best-attempts table per difficulty
//! - `storage`: LocalStorage/in-memory key-value backends
//! - `session`: Action reducer driving the page

pub mod difficulty;
pub mod error;
pub mod highscores;
pub mod round;
pub mod session;
pub mod storage;

pub use difficulty::{Difficulty, DifficultyConfig};
pub use error::{GameError, Result};
pub use highscores::{ScoreRecord, ScoreStore, ScoreTable};
pub use round::{Round, RoundStatus};
pub use session::{Action, Effect, GameSession, View};

/// Game configuration constants
pub mod consts {
    /// LocalStorage key for the high score table
    pub const HIGH_SCORE_KEY: &str = "guess-game:highscores:v1";
    /// Name used when the player leaves the field blank
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}
