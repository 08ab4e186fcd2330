//! Session reducer
//!
//! One user action in, new session plus a list of effects out. The front end
//! owns the single `GameSession` and executes the effects (render, persist,
//! input housekeeping). Nothing in here touches the DOM or storage.

use rand::Rng;

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::highscores::ScoreTable;
use crate::round::{GuessOutcome, Round, RoundStatus, new_round, start_round, submit_guess};

/// Tone of a feedback message (maps to a CSS modifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Neutral,
    Success,
    Warning,
    Danger,
}

impl FeedbackKind {
    /// CSS class for the feedback element
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackKind::Neutral => "feedback",
            FeedbackKind::Success => "feedback feedback--success",
            FeedbackKind::Warning => "feedback feedback--warning",
            FeedbackKind::Danger => "feedback feedback--danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    fn new(text: impl Into<String>, kind: FeedbackKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A user action, carrying whatever the page read from its inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start { difficulty: String, player_name: String },
    Guess { raw: String, hints: bool, player_name: String },
    NewRound,
    Reset { difficulty: String },
    SelectDifficulty { difficulty: String },
}

/// Work for the front end after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearInput,
    FocusInput,
    ClearHistory,
    SaveScores(ScoreTable),
    Render,
}

/// Score panel contents for the selected difficulty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreView {
    pub player: String,
    pub difficulty: String,
    pub best: String,
}

/// Everything the page needs to draw itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub status: RoundStatus,
    pub max: u32,
    pub attempts_remaining: u32,
    pub guess_log: Vec<u32>,
    pub feedback: Option<Feedback>,
    pub can_guess: bool,
    pub can_start_new_round: bool,
    pub high_score: HighScoreView,
}

impl View {
    pub fn range_text(&self) -> String {
        format!("Range: 1–{}", self.max)
    }

    pub fn attempts_text(&self) -> String {
        format!("Attempts left: {}", self.attempts_remaining)
    }
}

/// Single-player session state
#[derive(Debug, Clone)]
pub struct GameSession {
    selected: Difficulty,
    round: Round,
    player_name: String,
    scores: ScoreTable,
    feedback: Option<Feedback>,
}

/// Trimmed name, or the default when blank
pub fn normalize_player_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

impl GameSession {
    /// Fresh session with a not-yet-started round at the default difficulty
    pub fn new<R: Rng>(scores: ScoreTable, rng: &mut R) -> Self {
        let selected = Difficulty::default();
        Self {
            selected,
            round: Round::prepare(selected, rng),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            scores,
            feedback: None,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn selected(&self) -> Difficulty {
        self.selected
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Apply one action
    pub fn handle_action<R: Rng>(mut self, action: Action, rng: &mut R) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        match action {
            Action::Start {
                difficulty,
                player_name,
            } => match difficulty.parse::<Difficulty>() {
                Ok(difficulty) => {
                    self.selected = difficulty;
                    self.player_name = normalize_player_name(&player_name);
                    self.round = start_round(difficulty, rng);
                    self.feedback = Some(Feedback::new(
                        format!("Good luck, {}!", self.player_name),
                        FeedbackKind::Warning,
                    ));
                    log::info!("{} started a {} round", self.player_name, difficulty);
                    effects.extend([Effect::ClearHistory, Effect::ClearInput, Effect::FocusInput]);
                }
                Err(e) => self.reject_difficulty(e),
            },

            Action::Guess {
                raw,
                hints,
                player_name,
            } => self.guess(&raw, hints, &player_name, &mut effects),

            Action::NewRound => {
                self.round = new_round(&self.round, rng);
                self.feedback = Some(Feedback::new(
                    "New round started. You got this!",
                    FeedbackKind::Warning,
                ));
                effects.extend([Effect::ClearHistory, Effect::ClearInput, Effect::FocusInput]);
            }

            Action::Reset { difficulty } => match difficulty.parse::<Difficulty>() {
                Ok(difficulty) => {
                    self.selected = difficulty;
                    self.round = Round::prepare(difficulty, rng);
                    self.feedback = Some(Feedback::new("Game reset.", FeedbackKind::Neutral));
                    effects.extend([Effect::ClearHistory, Effect::ClearInput]);
                }
                Err(e) => self.reject_difficulty(e),
            },

            Action::SelectDifficulty { difficulty } => match difficulty.parse::<Difficulty>() {
                Ok(difficulty) => {
                    self.selected = difficulty;
                    // A live round keeps its own range; only idle rounds preview the new one
                    if self.round.status() != RoundStatus::InProgress {
                        self.round = Round::prepare(difficulty, rng);
                        effects.push(Effect::ClearHistory);
                    }
                    self.feedback = Some(Feedback::new(
                        format!("Difficulty set to {}.", difficulty),
                        FeedbackKind::Neutral,
                    ));
                }
                Err(e) => self.reject_difficulty(e),
            },
        }

        effects.push(Effect::Render);
        (self, effects)
    }

    fn guess(&mut self, raw: &str, hints: bool, player_name: &str, effects: &mut Vec<Effect>) {
        let max = self.round.max();
        let result = match submit_guess(&mut self.round, raw, hints) {
            Ok(result) => result,
            Err(e) if e.is_input_error() => {
                self.feedback = Some(Feedback::new(
                    format!("Please enter a number between 1 and {}.", max),
                    FeedbackKind::Danger,
                ));
                return;
            }
            Err(e) => {
                log::debug!("Ignoring guess: {}", e);
                return;
            }
        };

        match result.outcome {
            GuessOutcome::Won { secret } => {
                self.feedback = Some(Feedback::new(
                    format!("Correct! The number was {}.", secret),
                    FeedbackKind::Success,
                ));
                self.player_name = normalize_player_name(player_name);
                let attempts = self.round.attempts_used();
                if self
                    .scores
                    .record_win(self.round.difficulty(), &self.player_name, attempts)
                {
                    effects.push(Effect::SaveScores(self.scores.clone()));
                }
            }
            GuessOutcome::Lost { secret } => {
                self.feedback = Some(Feedback::new(
                    format!("Out of attempts. The number was {}.", secret),
                    FeedbackKind::Danger,
                ));
            }
            GuessOutcome::Continue {
                direction,
                proximity,
            } => {
                let text = match proximity {
                    Some(band) if hints => format!("{}! {}.", direction, band),
                    _ => "Try again!".to_string(),
                };
                self.feedback = Some(Feedback::new(text, FeedbackKind::Warning));
                effects.extend([Effect::ClearInput, Effect::FocusInput]);
            }
        }
    }

    fn reject_difficulty(&mut self, err: GameError) {
        log::error!("{}", err);
        self.feedback = Some(Feedback::new(err.to_string(), FeedbackKind::Danger));
    }

    /// Snapshot for rendering
    pub fn view(&self) -> View {
        let status = self.round.status();
        let record = self.scores.get(self.selected);
        View {
            status,
            max: self.round.max(),
            attempts_remaining: self.round.attempts_remaining(),
            guess_log: self.round.guess_log().to_vec(),
            feedback: self.feedback.clone(),
            can_guess: status == RoundStatus::InProgress,
            can_start_new_round: status != RoundStatus::InProgress,
            high_score: HighScoreView {
                player: record
                    .map(|r| r.player_name.clone())
                    .unwrap_or_else(|| "—".to_string()),
                difficulty: self.selected.label().to_string(),
                best: record
                    .map(|r| r.best_attempts.to_string())
                    .unwrap_or_else(|| "—".to_string()),
            },
        }
    }
}
