//! Bounded local boards and merging with a shared board.

use super::{DEFAULT_LIMIT, LeaderboardEntry, LeaderboardError, LeaderboardErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Top-N list kept on the player's device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalBoard {
    entries: Vec<LeaderboardEntry>,
    limit: usize,
}

impl LocalBoard {
    /// An empty board holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Adds an entry, keeping the best `limit` by score.
    #[instrument(skip(self, entry), fields(name = %entry.name(), score = entry.score()))]
    pub fn push(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score().cmp(a.score()));
        self.entries.truncate(self.limit);
    }

    /// Entries, best first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Maximum number of entries kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Serializes the board for device storage.
    #[instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        serde_json::to_string(self)
            .map_err(|e| LeaderboardError::new(LeaderboardErrorKind::Store(e.to_string())))
    }

    /// Reads a board back from device storage, re-sorting and trimming it
    /// in case it was edited by hand.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, LeaderboardError> {
        let stored: Self = serde_json::from_str(json)
            .map_err(|e| LeaderboardError::new(LeaderboardErrorKind::Store(e.to_string())))?;
        let mut board = Self::new(stored.limit);
        for entry in stored.entries {
            board.push(entry);
        }
        debug!(entries = board.entries.len(), "Loaded local board");
        Ok(board)
    }
}

impl Default for LocalBoard {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Combines a local and a shared board.
///
/// Entries with the same name, score and time appear once. The result is
/// ordered by score, then by faster time, and cut to `limit`.
#[instrument(skip(local, shared), fields(local = local.len(), shared = shared.len()))]
pub fn merge_leaderboards(
    local: &[LeaderboardEntry],
    shared: &[LeaderboardEntry],
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut seen = HashSet::new();
    let mut merged: Vec<LeaderboardEntry> = local
        .iter()
        .chain(shared)
        .filter(|entry| seen.insert(entry.identity()))
        .cloned()
        .collect();
    merged.sort_by(LeaderboardEntry::rank_cmp);
    merged.truncate(limit);
    debug!(merged = merged.len(), "Merged leaderboards");
    merged
}

/// Whole days between `recorded_at` and `now`; zero for anything in the
/// last 24 hours or in the future.
pub fn days_ago(recorded_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - recorded_at).num_days().max(0)
}

/// "today", "1 day ago" or "N days ago".
pub fn format_days_ago(recorded_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_ago(recorded_at, now) {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        days => format!("{days} days ago"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn entry(name: &str, score: u32, time: f64) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score, time, 0, at()).unwrap()
    }

    #[test]
    fn test_local_board_keeps_best() {
        let mut board = LocalBoard::new(2);
        board.push(entry("a", 50, 60.0));
        board.push(entry("b", 90, 60.0));
        board.push(entry("c", 70, 60.0));
        let names: Vec<&str> = board.entries().iter().map(|e| e.name().as_str()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    #[test]
    fn test_local_board_storage() {
        let mut board = LocalBoard::new(3);
        board.push(entry("ana", 40, 50.0));
        board.push(entry("ivo", 70, 55.0));
        let restored = LocalBoard::from_json(&board.to_json().unwrap()).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_stored_board_trimmed_on_load() {
        let mut wide = LocalBoard::new(5);
        for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
            wide.push(entry(name, 10 * i as u32, 30.0));
        }
        let json = wide.to_json().unwrap().replace("\"limit\":5", "\"limit\":2");
        let board = LocalBoard::from_json(&json).unwrap();
        let names: Vec<&str> = board.entries().iter().map(|e| e.name().as_str()).collect();
        assert_eq!(names, ["d", "c"]);
    }

    #[test]
    fn test_corrupt_storage_is_store_error() {
        let err = LocalBoard::from_json("{\"entries\": 3}").unwrap_err();
        assert!(matches!(err.kind(), LeaderboardErrorKind::Store(_)));
    }

    #[test]
    fn test_merge_dedupes_and_orders() {
        let local = vec![entry("ana", 80, 70.0), entry("ivo", 80, 65.0)];
        let shared = vec![entry("ana", 80, 70.0), entry("eva", 95, 90.0)];
        let merged = merge_leaderboards(&local, &shared, 10);
        let names: Vec<&str> = merged.iter().map(|e| e.name().as_str()).collect();
        assert_eq!(names, ["eva", "ivo", "ana"]);
    }

    #[test]
    fn test_merge_respects_limit() {
        let local: Vec<_> = (0..8).map(|i| entry("p", i, 10.0)).collect();
        let shared: Vec<_> = (8..16).map(|i| entry("q", i, 10.0)).collect();
        assert_eq!(merge_leaderboards(&local, &shared, 10).len(), 10);
    }

    #[test]
    fn test_days_ago() {
        let now = at();
        assert_eq!(format_days_ago(now, now), "today");
        assert_eq!(format_days_ago(now - Duration::hours(20), now), "today");
        assert_eq!(format_days_ago(now - Duration::hours(25), now), "1 day ago");
        assert_eq!(format_days_ago(now - Duration::days(10), now), "10 days ago");
    }
}
