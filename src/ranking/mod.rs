//! Leaderboard ranking
//!
//! This module holds the ranking engine, the timestamp handling it relies on
//! for per-player ordering, and an optional cache for computed rankings.

pub mod cache;
pub mod engine;
pub mod timestamp;

// Re-export commonly used types
pub use cache::{RankingCache, RankingKey, SnapshotId};
pub use engine::{available_roles, rank, RankingEngine};
pub use timestamp::parse_timestamp;
