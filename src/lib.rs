//! Battle Board - leaderboard engine for game result logs
//!
//! This crate ranks players from a flat log of game participations: it groups
//! logs by player, filters them by role, and computes wins, win rates and the
//! current winning streak of every player.

pub mod config;
pub mod display;
pub mod error;
pub mod leaderboard;
pub mod ranking;
pub mod source;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use leaderboard::Leaderboard;
pub use ranking::{available_roles, rank, RankingEngine};
pub use source::{InMemoryLogSource, JsonFileLogSource, LogSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
