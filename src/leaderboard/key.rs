//! Board keys: one board per game configuration.
//!
//! Keys render as `division_20q_medium` or
//! `math_20q_2d_addition_subtraction_medium` and parse back from the same
//! text, with or without the `leaderboard_` prefix used for device storage.

use super::{LeaderboardError, LeaderboardErrorKind};
use crate::config::Difficulty;
use drill_engine::{DigitCount, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Prefix of board keys in device storage.
pub const STORAGE_PREFIX: &str = "leaderboard_";

/// Identifies the board a score belongs on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardKey {
    /// Divisibility quiz board.
    Division {
        /// Questions per round.
        questions: usize,
        /// Time setting.
        difficulty: Difficulty,
    },
    /// Column arithmetic board.
    Column {
        /// Problems per round.
        questions: usize,
        /// Operand width.
        digits: DigitCount,
        /// Enabled operations, sorted by name without repeats.
        operations: Vec<Operation>,
        /// Time setting.
        difficulty: Difficulty,
    },
}

impl BoardKey {
    /// Key for a divisibility quiz.
    pub fn division(questions: usize, difficulty: Difficulty) -> Self {
        Self::Division {
            questions,
            difficulty,
        }
    }

    /// Key for a column round. Operation order does not matter.
    pub fn column(
        questions: usize,
        digits: DigitCount,
        operations: &[Operation],
        difficulty: Difficulty,
    ) -> Self {
        let mut operations = operations.to_vec();
        operations.sort_by_key(|op| op.to_string());
        operations.dedup();
        Self::Column {
            questions,
            digits,
            operations,
            difficulty,
        }
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Division {
                questions,
                difficulty,
            } => write!(f, "division_{questions}q_{difficulty}"),
            Self::Column {
                questions,
                digits,
                operations,
                difficulty,
            } => {
                let ops = operations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("_");
                write!(f, "math_{questions}q_{digits}d_{ops}_{difficulty}")
            }
        }
    }
}

impl FromStr for BoardKey {
    type Err = LeaderboardError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.strip_prefix(STORAGE_PREFIX).unwrap_or(s);
        parse_key(key)
            .ok_or_else(|| LeaderboardError::new(LeaderboardErrorKind::InvalidBoardKey(s.into())))
    }
}

fn parse_key(key: &str) -> Option<BoardKey> {
    let parts: Vec<&str> = key.split('_').collect();
    match parts.as_slice() {
        ["division", questions, difficulty] => Some(BoardKey::division(
            counted(questions, "q")?,
            difficulty.parse().ok()?,
        )),
        ["math", questions, digits, rest @ ..] => {
            let (difficulty, ops) = rest.split_last()?;
            if ops.is_empty() {
                return None;
            }
            let operations = ops
                .iter()
                .map(|op| op.parse().ok())
                .collect::<Option<Vec<Operation>>>()?;
            Some(BoardKey::column(
                counted(questions, "q")?,
                DigitCount::new(counted(digits, "d")?).ok()?,
                &operations,
                difficulty.parse().ok()?,
            ))
        }
        _ => None,
    }
}

/// Parses `20q` style segments.
fn counted<T: FromStr>(part: &str, unit: &str) -> Option<T> {
    part.strip_suffix(unit)?.parse().ok()
}
