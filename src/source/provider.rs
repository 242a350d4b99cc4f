//! Log source trait and implementations
//!
//! A log source hands the leaderboard one complete snapshot of game logs.
//! Where the rows come from is the source's business; the ranking engine only
//! sees the resulting `Vec<GameLog>`.

use crate::error::{RankingError, Result};
use crate::types::GameLog;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Trait for fetching the complete set of game logs
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch every game log the source holds
    async fn fetch_logs(&self) -> Result<Vec<GameLog>>;

    /// Human readable description for log messages
    fn describe(&self) -> String;
}

/// Log source backed by a fixed list of logs
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogSource {
    logs: Vec<GameLog>,
}

impl InMemoryLogSource {
    pub fn new(logs: Vec<GameLog>) -> Self {
        Self { logs }
    }
}

#[async_trait]
impl LogSource for InMemoryLogSource {
    async fn fetch_logs(&self) -> Result<Vec<GameLog>> {
        Ok(self.logs.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} logs)", self.logs.len())
    }
}

/// Log source reading a JSON array of game logs from disk
///
/// The file is re-read on every fetch, so a refresh picks up new rows.
#[derive(Debug, Clone)]
pub struct JsonFileLogSource {
    path: PathBuf,
}

impl JsonFileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogSource for JsonFileLogSource {
    async fn fetch_logs(&self) -> Result<Vec<GameLog>> {
        debug!("Reading game logs from {}", self.path.display());

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RankingError::SourceUnavailable {
                message: format!("{}: {}", self.path.display(), e),
            }
        })?;

        let logs: Vec<GameLog> =
            serde_json::from_str(&contents).map_err(|e| RankingError::InvalidLogData {
                reason: format!("{}: {}", self.path.display(), e),
            })?;

        info!("Loaded {} game logs from {}", logs.len(), self.path.display());
        Ok(logs)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
