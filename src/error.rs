//! Error types for the leaderboard
//!
//! The ranking engine itself never fails; these errors cover the collaborators
//! around it (log sources, configuration, the ranking cache).

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific leaderboard scenarios
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Log source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Invalid log data: {reason}")]
    InvalidLogData { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
