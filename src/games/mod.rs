//! Timed drill rounds.
//!
//! A round owns its shuffled question list, records every answer with the
//! points it earned, and summarises into a [`RoundSummary`] at the end.

pub mod column;
pub mod division;

use derive_getters::Getters;
use derive_more::{Display, Error};
use drill_engine::{DivisibilityClass, EngineError, MAX_POINTS};
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub use column::{ColumnAnswer, ColumnRound};
pub use division::{DivisionAnswer, DivisionRound};

/// What went wrong while running a round.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Column round asked for with no operations enabled.
    #[display("no operations enabled")]
    NoOperations,
    /// Round asked for with zero questions.
    #[display("round has no questions")]
    NoQuestions,
    /// Answer given after the last question.
    #[display("round already finished")]
    RoundFinished,
    /// Problem generation or analysis failed.
    #[display("{_0}")]
    Engine(EngineError),
}

/// Round error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<EngineError> for GameError {
    #[track_caller]
    fn from(err: EngineError) -> Self {
        Self::new(GameErrorKind::Engine(err))
    }
}

/// End-of-round totals.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Points earned.
    score: u32,
    /// Wall-clock time for the round.
    time_seconds: f64,
    /// Points per minute, the ranking figure.
    score_per_minute: u32,
    /// Points available if every answer were instant and correct.
    max_score: u32,
}

impl RoundSummary {
    /// Summarises a round of `question_count` questions.
    #[instrument]
    pub fn new(score: u32, time_seconds: f64, question_count: usize) -> Self {
        Self {
            score,
            time_seconds,
            score_per_minute: score_per_minute(score, time_seconds),
            max_score: max_score(question_count),
        }
    }
}

/// Score scaled to a minute. A round with no measured time keeps its raw score.
#[instrument]
pub fn score_per_minute(score: u32, time_seconds: f64) -> u32 {
    let minutes = time_seconds / 60.0;
    if minutes > 0.0 {
        (f64::from(score) / minutes).round() as u32
    } else {
        score
    }
}

/// Best possible score for `question_count` questions.
pub fn max_score(question_count: usize) -> u32 {
    u32::try_from(question_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(MAX_POINTS)
}

/// Renders seconds as `m:ss`.
#[instrument]
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Questions per class for a quiz of `count` questions.
///
/// Classes get an even share; a remainder goes to 9, then 6, then 3, so the
/// counts always add up to `count`.
#[instrument]
pub fn class_quotas(count: usize) -> Vec<(DivisibilityClass, usize)> {
    let share = count / DivisibilityClass::ALL.len();
    let remainder = count % DivisibilityClass::ALL.len();
    DivisibilityClass::ALL
        .iter()
        .enumerate()
        .map(|(i, &class)| (class, share + usize::from(i < remainder)))
        .collect()
}

/// Split of a column round into (no-regrouping, regrouping) problems.
///
/// A quarter (rounded down) are plain; the rest force a carry or borrow.
#[instrument]
pub fn carry_quotas(count: usize) -> (usize, usize) {
    let plain = count / 4;
    (plain, count - plain)
}
