//! Per-group leaderboards keyed by game configuration.
//!
//! Scores from different settings never share a board: the [`BoardKey`]
//! names the game, question count, width, operations and difficulty. Groups
//! (classes, families) get their own set of boards under a [`GroupId`].

mod entry;
mod group;
mod key;
mod local;
mod store;

use derive_more::{Display, Error};
use tracing::instrument;

pub use entry::LeaderboardEntry;
pub use group::{GROUP_WORDS, GroupId};
pub use key::{BoardKey, STORAGE_PREFIX};
pub use local::{LocalBoard, days_ago, format_days_ago, merge_leaderboards};
pub use store::{InMemoryLeaderboard, LeaderboardStore};

/// Entries shown on a board unless configured otherwise.
pub const DEFAULT_LIMIT: usize = 10;

/// What went wrong with a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LeaderboardErrorKind {
    /// Player name was blank.
    #[display("player name is empty")]
    EmptyName,
    /// Board key text did not name a known board.
    #[display("invalid board key: {_0}")]
    InvalidBoardKey(String),
    /// Backing store failed, or returned data it could not read back.
    #[display("store failure: {_0}")]
    Store(String),
}

/// Leaderboard error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Leaderboard error: {} at {}:{}", kind, file, line)]
pub struct LeaderboardError {
    /// Error kind.
    pub kind: LeaderboardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LeaderboardError {
    /// Creates a new leaderboard error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: LeaderboardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &LeaderboardErrorKind {
        &self.kind
    }
}
