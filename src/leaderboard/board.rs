//! Leaderboard state
//!
//! A [`Leaderboard`] owns one snapshot of game logs and answers ranking
//! queries against it. Rankings are memoized per role filter until the
//! snapshot is replaced by [`Leaderboard::refresh`].

use crate::config::RankingSettings;
use crate::error::Result;
use crate::ranking::{available_roles, RankingCache, RankingEngine, RankingKey, SnapshotId};
use crate::source::LogSource;
use crate::types::{GameLog, PlayerStat, RoleFilter};
use crate::utils::{current_timestamp, generate_snapshot_id};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// One immutable set of logs fetched from a source
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    pub id: SnapshotId,
    pub logs: Arc<Vec<GameLog>>,
    pub loaded_at: DateTime<Utc>,
}

impl LogSnapshot {
    pub fn new(logs: Vec<GameLog>) -> Self {
        Self {
            id: generate_snapshot_id(),
            logs: Arc::new(logs),
            loaded_at: current_timestamp(),
        }
    }
}

/// Rankings over the current log snapshot
#[derive(Debug)]
pub struct Leaderboard {
    snapshot: LogSnapshot,
    engine: RankingEngine,
    cache: RankingCache,
}

impl Leaderboard {
    /// Build a leaderboard from logs that are already in memory
    pub fn new(logs: Vec<GameLog>, settings: &RankingSettings) -> Self {
        Self {
            snapshot: LogSnapshot::new(logs),
            engine: RankingEngine::new(settings.unknown_player_name.clone()),
            cache: RankingCache::new(settings.cache_max_entries),
        }
    }

    /// Fetch a snapshot from `source` and build a leaderboard over it
    pub async fn load(source: &dyn LogSource, settings: &RankingSettings) -> Result<Self> {
        let logs = source.fetch_logs().await?;
        info!("Loaded {} logs from {}", logs.len(), source.describe());
        Ok(Self::new(logs, settings))
    }

    /// Replace the snapshot with a fresh fetch from `source`
    ///
    /// On a fetch error the current snapshot is kept.
    pub async fn refresh(&mut self, source: &dyn LogSource) -> Result<()> {
        let logs = source.fetch_logs().await?;
        let previous = std::mem::replace(&mut self.snapshot, LogSnapshot::new(logs));
        let dropped = self.cache.invalidate(previous.id)?;

        info!(
            "Refreshed leaderboard from {}: {} logs (was {}), {} cached rankings dropped",
            source.describe(),
            self.snapshot.logs.len(),
            previous.logs.len(),
            dropped
        );
        Ok(())
    }

    /// Ranking for `filter`, computed once per snapshot
    pub fn ranking(&self, filter: &RoleFilter) -> Result<Arc<Vec<PlayerStat>>> {
        let key = RankingKey::new(self.snapshot.id, filter.clone());
        let logs = &self.snapshot.logs;
        self.cache
            .get_or_insert_with(key, || self.engine.rank(logs, filter))
    }

    /// Filters available for the current snapshot
    pub fn roles(&self) -> Vec<RoleFilter> {
        available_roles(&self.snapshot.logs)
    }

    pub fn snapshot(&self) -> &LogSnapshot {
        &self.snapshot
    }

    pub fn log_count(&self) -> usize {
        self.snapshot.logs.len()
    }

    /// Number of distinct players across all roles
    pub fn player_count(&self) -> Result<usize> {
        Ok(self.ranking(&RoleFilter::AllRoles)?.len())
    }
}
