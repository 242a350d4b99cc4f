//! Memoized rankings
//!
//! Rankings are cached per `(snapshot, filter)` pair. A snapshot id names one
//! immutable set of logs, so a cached ranking is always identical to what the
//! engine would compute again.

use crate::error::{RankingError, Result};
use crate::types::{PlayerStat, RoleFilter};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Identity of one loaded set of logs
pub type SnapshotId = Uuid;

/// Cache key for a ranking
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RankingKey {
    pub snapshot_id: SnapshotId,
    pub filter: RoleFilter,
}

impl RankingKey {
    pub fn new(snapshot_id: SnapshotId, filter: RoleFilter) -> Self {
        Self {
            snapshot_id,
            filter,
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    rankings: HashMap<RankingKey, Arc<Vec<PlayerStat>>>,
    insertion_order: VecDeque<RankingKey>,
}

/// Bounded in-memory ranking cache
#[derive(Debug)]
pub struct RankingCache {
    state: RwLock<CacheState>,
    max_entries: usize,
}

impl RankingCache {
    /// Create a cache holding at most `max_entries` rankings
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            max_entries,
        }
    }

    /// Cached ranking for `key`, if any
    pub fn get(&self, key: &RankingKey) -> Result<Option<Arc<Vec<PlayerStat>>>> {
        let state = self.state.read().map_err(|_| RankingError::InternalError {
            message: "Failed to acquire ranking cache read lock".to_string(),
        })?;

        Ok(state.rankings.get(key).cloned())
    }

    /// Cached ranking for `key`, computing and storing it on a miss
    pub fn get_or_insert_with<F>(&self, key: RankingKey, compute: F) -> Result<Arc<Vec<PlayerStat>>>
    where
        F: FnOnce() -> Vec<PlayerStat>,
    {
        if let Some(ranking) = self.get(&key)? {
            debug!("Ranking cache hit for filter {}", key.filter);
            return Ok(ranking);
        }

        debug!("Ranking cache miss for filter {}", key.filter);
        let ranking = Arc::new(compute());
        self.insert(key, ranking.clone())?;
        Ok(ranking)
    }

    /// Store a ranking, evicting the oldest entries beyond capacity
    pub fn insert(&self, key: RankingKey, ranking: Arc<Vec<PlayerStat>>) -> Result<()> {
        let mut state = self.state.write().map_err(|_| RankingError::InternalError {
            message: "Failed to acquire ranking cache write lock".to_string(),
        })?;

        if state.rankings.insert(key.clone(), ranking).is_none() {
            state.insertion_order.push_back(key);
        }

        while state.rankings.len() > self.max_entries {
            match state.insertion_order.pop_front() {
                Some(oldest) => {
                    state.rankings.remove(&oldest);
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Drop every ranking computed from `snapshot_id`; returns how many
    pub fn invalidate(&self, snapshot_id: SnapshotId) -> Result<usize> {
        let mut state = self.state.write().map_err(|_| RankingError::InternalError {
            message: "Failed to acquire ranking cache write lock".to_string(),
        })?;

        let before = state.rankings.len();
        state.rankings.retain(|key, _| key.snapshot_id != snapshot_id);
        state
            .insertion_order
            .retain(|key| key.snapshot_id != snapshot_id);

        Ok(before - state.rankings.len())
    }

    /// Remove every cached ranking
    pub fn clear(&self) -> Result<()> {
        let mut state = self.state.write().map_err(|_| RankingError::InternalError {
            message: "Failed to acquire ranking cache write lock".to_string(),
        })?;

        state.rankings.clear();
        state.insertion_order.clear();
        Ok(())
    }

    /// Number of cached rankings
    pub fn len(&self) -> Result<usize> {
        let state = self.state.read().map_err(|_| RankingError::InternalError {
            message: "Failed to acquire ranking cache read lock".to_string(),
        })?;

        Ok(state.rankings.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for RankingCache {
    fn default() -> Self {
        Self::new(64)
    }
}
