//! Round state and lifecycle
//!
//! `NotStarted -> InProgress -> {Won | Lost}`. Terminal rounds are never
//! reused; a new one is created with `start_round`/`new_round`.

use rand::Rng;

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};

/// Where a round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Prepared (range and attempts known) but not yet playable
    NotStarted,
    /// Accepting guesses
    InProgress,
    /// Secret was guessed
    Won,
    /// Attempts ran out
    Lost,
}

impl RoundStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundStatus::Won | RoundStatus::Lost)
    }
}

/// One play-through from secret selection to win/loss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    difficulty: Difficulty,
    secret: u32,
    max: u32,
    pub(crate) attempts_remaining: u32,
    pub(crate) guess_log: Vec<u32>,
    pub(crate) status: RoundStatus,
}

impl Round {
    /// Create a round that shows its range and budget but does not accept guesses yet
    pub fn prepare<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let cfg = difficulty.config();
        let secret = rng.random_range(1..=cfg.max);
        Self::build(difficulty, secret)
    }

    /// Create a playable round with a known secret
    pub fn with_secret(difficulty: Difficulty, secret: u32) -> Result<Self> {
        let max = difficulty.config().max;
        if !(1..=max).contains(&secret) {
            return Err(GameError::OutOfRange {
                guess: i64::from(secret),
                max,
            });
        }
        let mut round = Self::build(difficulty, secret);
        round.begin();
        Ok(round)
    }

    fn build(difficulty: Difficulty, secret: u32) -> Self {
        let cfg = difficulty.config();
        Self {
            difficulty,
            secret,
            max: cfg.max,
            attempts_remaining: cfg.max_attempts,
            guess_log: Vec::with_capacity(cfg.max_attempts as usize),
            status: RoundStatus::NotStarted,
        }
    }

    /// NotStarted -> InProgress. Any other status is left alone.
    pub fn begin(&mut self) {
        if self.status == RoundStatus::NotStarted {
            self.status = RoundStatus::InProgress;
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    /// Guesses so far, oldest first
    pub fn guess_log(&self) -> &[u32] {
        &self.guess_log
    }

    pub fn attempts_used(&self) -> u32 {
        self.guess_log.len() as u32
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// The secret, revealed only once the round has ended
    pub fn secret(&self) -> Option<u32> {
        self.status.is_finished().then_some(self.secret)
    }

    pub(crate) fn secret_unchecked(&self) -> u32 {
        self.secret
    }
}

/// Start a playable round at the given difficulty
pub fn start_round<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Round {
    let mut round = Round::prepare(difficulty, rng);
    round.begin();
    log::debug!(
        "Round started: {} (1-{}, {} attempts)",
        difficulty,
        round.max,
        round.attempts_remaining
    );
    round
}

/// Replay at the same difficulty as `previous`
pub fn new_round<R: Rng>(previous: &Round, rng: &mut R) -> Round {
    start_round(previous.difficulty, rng)
}
