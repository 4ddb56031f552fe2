//! A single leaderboard row.

use super::{LeaderboardError, LeaderboardErrorKind};
use crate::games::RoundSummary;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::instrument;

/// A finished round as it appears on a board.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name, trimmed.
    name: String,
    /// Points earned.
    score: u32,
    /// Round time in seconds.
    time_seconds: f64,
    /// Points per minute.
    score_per_minute: u32,
    /// When the round was finished.
    recorded_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Builds an entry, rejecting a blank name.
    #[instrument(skip(name))]
    pub fn new(
        name: &str,
        score: u32,
        time_seconds: f64,
        score_per_minute: u32,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, LeaderboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::new(LeaderboardErrorKind::EmptyName));
        }
        Ok(Self {
            name: name.to_string(),
            score,
            time_seconds,
            score_per_minute,
            recorded_at,
        })
    }

    /// Entry for a finished round.
    pub fn from_summary(
        name: &str,
        summary: &RoundSummary,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, LeaderboardError> {
        Self::new(
            name,
            *summary.score(),
            *summary.time_seconds(),
            *summary.score_per_minute(),
            recorded_at,
        )
    }

    /// Board order: higher score first, faster time breaking ties.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.time_seconds.total_cmp(&other.time_seconds))
    }

    /// Identity used when merging boards: same name, score and time.
    pub(super) fn identity(&self) -> (String, u32, u64) {
        (self.name.clone(), self.score, self.time_seconds.to_bits())
    }
}
