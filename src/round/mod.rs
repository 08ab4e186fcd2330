//! Round engine
//!
//! Everything that decides the outcome of a round lives here. This module is
//! pure: the caller owns the `Round`, randomness comes in as `&mut impl Rng`,
//! and nothing touches storage or the DOM.

pub mod guess;
pub mod state;

pub use guess::{Direction, GuessOutcome, GuessResult, ProximityBand, parse_guess, submit_guess};
pub use state::{Round, RoundStatus, new_round, start_round};
