//! Leaderboard storage port and an in-process implementation.

use super::{BoardKey, GroupId, LeaderboardEntry, LeaderboardError, LeaderboardErrorKind};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Where finished rounds are saved and top lists are read from.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Saves one entry on the group's board for `key`.
    async fn save_score(
        &self,
        group: &GroupId,
        key: &BoardKey,
        entry: LeaderboardEntry,
    ) -> Result<(), LeaderboardError>;

    /// Best `limit` entries by score.
    async fn top(
        &self,
        group: &GroupId,
        key: &BoardKey,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

type BoardMap = HashMap<(GroupId, String), Vec<LeaderboardEntry>>;

/// Boards held in memory, shareable across tasks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    boards: Arc<RwLock<BoardMap>>,
}

impl InMemoryLeaderboard {
    /// An empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across every board.
    pub async fn len(&self) -> usize {
        self.boards.read().await.values().map(Vec::len).sum()
    }

    /// Whether nothing has been saved yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryLeaderboard {
    #[instrument(skip(self, group, key, entry), fields(%group, %key, name = %entry.name()))]
    async fn save_score(
        &self,
        group: &GroupId,
        key: &BoardKey,
        entry: LeaderboardEntry,
    ) -> Result<(), LeaderboardError> {
        if entry.name().trim().is_empty() {
            return Err(LeaderboardError::new(LeaderboardErrorKind::EmptyName));
        }
        let mut boards = self.boards.write().await;
        boards
            .entry((group.clone(), key.to_string()))
            .or_default()
            .push(entry);
        info!("Score saved");
        Ok(())
    }

    #[instrument(skip(self, group, key), fields(%group, %key))]
    async fn top(
        &self,
        group: &GroupId,
        key: &BoardKey,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let boards = self.boards.read().await;
        let mut entries = boards
            .get(&(group.clone(), key.to_string()))
            .cloned()
            .unwrap_or_default();
        entries.sort_by(|a, b| b.score().cmp(a.score()));
        entries.truncate(limit);
        debug!(count = entries.len(), "Read top scores");
        Ok(entries)
    }
}
