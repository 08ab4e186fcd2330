//! Error types shared by the round engine, score store and storage backends

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("unknown difficulty: {0:?}")]
    InvalidDifficulty(String),
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("guess {guess} is outside 1..={max}")]
    OutOfRange { guess: i64, max: u32 },
    #[error("round is already finished")]
    RoundAlreadyFinished,
    #[error("round has not started")]
    RoundNotStarted,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    /// True for errors caused by what the player typed (re-prompt, nothing consumed)
    pub fn is_input_error(&self) -> bool {
        matches!(self, GameError::NotANumber(_) | GameError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
