//! Guess evaluation
//!
//! Order matters: validation first (nothing consumed on bad input), then the
//! guess is logged and an attempt spent, then match is checked before
//! exhaustion so a last-attempt hit still wins.

use std::fmt;

use super::state::{Round, RoundStatus};
use crate::error::{GameError, Result};

/// Which way the secret lies from the guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Higher,
    Lower,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Higher => "Higher",
            Direction::Lower => "Lower",
        })
    }
}

/// How close a guess is, relative to the range size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityBand {
    Hot,
    Warm,
    Cold,
}

impl ProximityBand {
    /// Hot within ceil(2% of max), warm within ceil(6% of max), else cold
    pub fn classify(distance: u32, max: u32) -> Self {
        let hot = (max * 2).div_ceil(100);
        let warm = (max * 6).div_ceil(100);
        if distance <= hot {
            ProximityBand::Hot
        } else if distance <= warm {
            ProximityBand::Warm
        } else {
            ProximityBand::Cold
        }
    }
}

impl fmt::Display for ProximityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProximityBand::Hot => "🔥 Hot",
            ProximityBand::Warm => "🌡️ Warm",
            ProximityBand::Cold => "❄️ Cold",
        })
    }
}

/// What a valid guess did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Won { secret: u32 },
    Lost { secret: u32 },
    Continue {
        direction: Direction,
        /// Only filled when the caller asked for hints
        proximity: Option<ProximityBand>,
    },
}

/// Result of a valid guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessResult {
    pub guess: u32,
    pub attempts_remaining: u32,
    pub outcome: GuessOutcome,
}

/// Parse player input into a guess within `1..=max`
pub fn parse_guess(raw: &str, max: u32) -> Result<u32> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| GameError::NotANumber(raw.to_string()))?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(GameError::NotANumber(raw.to_string()));
    }
    // Saturating cast; anything that far out is out of range anyway
    let guess = value as i64;
    if guess < 1 || guess > i64::from(max) {
        return Err(GameError::OutOfRange { guess, max });
    }
    Ok(guess as u32)
}

/// Evaluate one guess against the round, mutating it only if the input is valid
pub fn submit_guess(round: &mut Round, raw: &str, hints: bool) -> Result<GuessResult> {
    match round.status {
        RoundStatus::NotStarted => return Err(GameError::RoundNotStarted),
        RoundStatus::Won | RoundStatus::Lost => return Err(GameError::RoundAlreadyFinished),
        RoundStatus::InProgress => {}
    }

    let guess = parse_guess(raw, round.max())?;
    let secret = round.secret_unchecked();

    round.guess_log.push(guess);
    round.attempts_remaining = round.attempts_remaining.saturating_sub(1);

    let outcome = if guess == secret {
        round.status = RoundStatus::Won;
        GuessOutcome::Won { secret }
    } else if round.attempts_remaining == 0 {
        round.status = RoundStatus::Lost;
        GuessOutcome::Lost { secret }
    } else {
        let direction = if guess < secret {
            Direction::Higher
        } else {
            Direction::Lower
        };
        let proximity =
            hints.then(|| ProximityBand::classify(guess.abs_diff(secret), round.max()));
        GuessOutcome::Continue {
            direction,
            proximity,
        }
    };

    log::debug!(
        "Guess {} -> {:?} ({} left)",
        guess,
        round.status,
        round.attempts_remaining
    );

    Ok(GuessResult {
        guess,
        attempts_remaining: round.attempts_remaining,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;

    fn easy_round(secret: u32) -> Round {
        Round::with_secret(Difficulty::Easy, secret).unwrap()
    }

    #[test]
    fn test_end_to_end_easy_round() {
        let mut round = easy_round(25);

        let r1 = submit_guess(&mut round, "10", false).unwrap();
        assert_eq!(
            r1.outcome,
            GuessOutcome::Continue {
                direction: Direction::Higher,
                proximity: None
            }
        );

        let r2 = submit_guess(&mut round, "40", false).unwrap();
        assert!(matches!(
            r2.outcome,
            GuessOutcome::Continue {
                direction: Direction::Lower,
                ..
            }
        ));

        let r3 = submit_guess(&mut round, "25", false).unwrap();
        assert_eq!(r3.outcome, GuessOutcome::Won { secret: 25 });
        assert_eq!(round.attempts_remaining(), 9);
        assert_eq!(round.guess_log(), &[10, 40, 25]);
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.secret(), Some(25));
    }

    #[test]
    fn test_match_on_last_attempt_wins() {
        let mut round = easy_round(30);
        round.attempts_remaining = 1;
        let result = submit_guess(&mut round, "30", false).unwrap();
        assert_eq!(result.outcome, GuessOutcome::Won { secret: 30 });
        assert_eq!(result.attempts_remaining, 0);
        assert_eq!(round.status(), RoundStatus::Won);
    }

    #[test]
    fn test_miss_on_last_attempt_loses() {
        let mut round = easy_round(30);
        round.attempts_remaining = 1;
        let result = submit_guess(&mut round, "29", true).unwrap();
        assert_eq!(result.outcome, GuessOutcome::Lost { secret: 30 });
        assert_eq!(round.attempts_remaining(), 0);
        assert_eq!(round.status(), RoundStatus::Lost);
    }

    #[test]
    fn test_exhausting_all_attempts() {
        let mut round = easy_round(50);
        for _ in 0..11 {
            let r = submit_guess(&mut round, "1", false).unwrap();
            assert!(matches!(r.outcome, GuessOutcome::Continue { .. }));
        }
        let last = submit_guess(&mut round, "2", false).unwrap();
        assert_eq!(last.outcome, GuessOutcome::Lost { secret: 50 });
        assert_eq!(round.guess_log().len(), 12);
    }

    #[test]
    fn test_not_a_number_leaves_round_untouched() {
        let mut round = easy_round(25);
        let before = round.clone();
        for raw in ["abc", "3.5.2", "", "   ", "NaN", "inf", "3.5"] {
            let err = submit_guess(&mut round, raw, false).unwrap_err();
            assert!(matches!(err, GameError::NotANumber(_)), "{raw:?} -> {err:?}");
        }
        assert_eq!(round, before);
    }

    #[test]
    fn test_out_of_range_leaves_round_untouched() {
        let mut round = easy_round(25);
        let before = round.clone();
        assert!(matches!(
            submit_guess(&mut round, "0", false),
            Err(GameError::OutOfRange { guess: 0, max: 50 })
        ));
        assert!(matches!(
            submit_guess(&mut round, "51", false),
            Err(GameError::OutOfRange { guess: 51, max: 50 })
        ));
        assert!(matches!(
            submit_guess(&mut round, "-4", false),
            Err(GameError::OutOfRange { .. })
        ));
        assert!(matches!(
            submit_guess(&mut round, "1e30", false),
            Err(GameError::OutOfRange { .. })
        ));
        assert_eq!(round, before);
    }

    #[test]
    fn test_parse_accepts_padding_and_integral_floats() {
        assert_eq!(parse_guess(" 12 ", 50).unwrap(), 12);
        assert_eq!(parse_guess("12.0", 50).unwrap(), 12);
        assert_eq!(parse_guess("1", 50).unwrap(), 1);
        assert_eq!(parse_guess("50", 50).unwrap(), 50);
    }

    #[test]
    fn test_finished_round_rejects_guesses() {
        let mut round = easy_round(5);
        submit_guess(&mut round, "5", false).unwrap();
        let before = round.clone();
        assert!(matches!(
            submit_guess(&mut round, "6", false),
            Err(GameError::RoundAlreadyFinished)
        ));
        assert_eq!(round, before);
    }

    #[test]
    fn test_not_started_round_rejects_guesses() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut round = Round::prepare(Difficulty::Medium, &mut rng);
        assert!(matches!(
            submit_guess(&mut round, "10", false),
            Err(GameError::RoundNotStarted)
        ));
        assert!(round.guess_log().is_empty());
    }

    #[test]
    fn test_proximity_only_with_hints() {
        let mut round = easy_round(25);
        let r = submit_guess(&mut round, "24", true).unwrap();
        assert_eq!(
            r.outcome,
            GuessOutcome::Continue {
                direction: Direction::Higher,
                proximity: Some(ProximityBand::Hot)
            }
        );
        let r = submit_guess(&mut round, "24", false).unwrap();
        assert_eq!(
            r.outcome,
            GuessOutcome::Continue {
                direction: Direction::Higher,
                proximity: None
            }
        );
    }

    #[test]
    fn test_proximity_boundaries() {
        // easy: hot <= 1, warm <= 3
        assert_eq!(ProximityBand::classify(1, 50), ProximityBand::Hot);
        assert_eq!(ProximityBand::classify(2, 50), ProximityBand::Warm);
        assert_eq!(ProximityBand::classify(3, 50), ProximityBand::Warm);
        assert_eq!(ProximityBand::classify(4, 50), ProximityBand::Cold);
        // medium: hot <= 2, warm <= 6
        assert_eq!(ProximityBand::classify(2, 100), ProximityBand::Hot);
        assert_eq!(ProximityBand::classify(3, 100), ProximityBand::Warm);
        assert_eq!(ProximityBand::classify(6, 100), ProximityBand::Warm);
        assert_eq!(ProximityBand::classify(7, 100), ProximityBand::Cold);
        // hard: hot <= 10, warm <= 30
        assert_eq!(ProximityBand::classify(10, 500), ProximityBand::Hot);
        assert_eq!(ProximityBand::classify(11, 500), ProximityBand::Warm);
        assert_eq!(ProximityBand::classify(30, 500), ProximityBand::Warm);
        assert_eq!(ProximityBand::classify(31, 500), ProximityBand::Cold);
        // tiny ranges still round up
        assert_eq!(ProximityBand::classify(1, 1), ProximityBand::Hot);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Direction::Higher.to_string(), "Higher");
        assert_eq!(Direction::Lower.to_string(), "Lower");
        assert_eq!(ProximityBand::Cold.to_string(), "❄️ Cold");
    }
}
