//! Main application configuration
//!
//! This module defines the configuration structures for battle-board,
//! including environment variable and TOML file loading and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::types::UNKNOWN_PLAYER_NAME;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub source: SourceSettings,
    pub ranking: RankingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where game logs are read from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// JSON file holding an array of game logs
    pub logs_path: Option<PathBuf>,
}

/// Ranking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Name shown for players whose latest log carries no name
    pub unknown_player_name: String,
    /// Maximum number of memoized rankings
    pub cache_max_entries: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "battle-board".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            unknown_player_name: UNKNOWN_PLAYER_NAME.to_string(),
            cache_max_entries: 64,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still
    /// override the file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Source settings
        if let Ok(path) = env::var("LOGS_PATH") {
            self.source.logs_path = Some(PathBuf::from(path));
        }

        // Ranking settings
        if let Ok(name) = env::var("UNKNOWN_PLAYER_NAME") {
            self.ranking.unknown_player_name = name;
        }
        if let Ok(max_entries) = env::var("RANKING_CACHE_MAX_ENTRIES") {
            self.ranking.cache_max_entries = max_entries
                .parse()
                .map_err(|_| anyhow!("Invalid RANKING_CACHE_MAX_ENTRIES value: {}", max_entries))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if let Some(path) = &config.source.logs_path {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Logs path cannot be empty"));
        }
    }

    // Validate ranking settings
    if config.ranking.unknown_player_name.is_empty() {
        return Err(anyhow!("Unknown player name cannot be empty"));
    }
    if config.ranking.cache_max_entries == 0 {
        return Err(anyhow!("Ranking cache must hold at least one entry"));
    }

    Ok(())
}
