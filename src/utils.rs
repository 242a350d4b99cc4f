//! Utility functions for the leaderboard

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique log snapshot ID
pub fn generate_snapshot_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Win percentage, 0 when no games were played
pub fn win_rate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(games) * 100.0
}
