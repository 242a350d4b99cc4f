//! Common types used throughout the leaderboard

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Unique identifier for players
pub type PlayerId = String;

/// Text form of [`RoleFilter::AllRoles`]
pub const ALL_ROLES: &str = "ALL";

/// Display name used when a player's most recent log carries no name
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// One game participation, as stored by the log source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    pub user_id: PlayerId,
    /// Display name at the time of the game
    #[serde(default)]
    pub user_name: Option<String>,
    pub role: String,
    pub is_win: bool,
    /// When the game happened. Sources that do not record it leave this empty,
    /// which makes the streak of the affected players unknown.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl GameLog {
    pub fn new(
        user_id: impl Into<PlayerId>,
        user_name: impl Into<String>,
        role: impl Into<String>,
        is_win: bool,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: Some(user_name.into()),
            role: role.into(),
            is_win,
            created_at: Some(created_at.into()),
        }
    }
}

/// Aggregated statistics for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub user_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub games: u32,
    /// Percentage in `0.0..=100.0`
    pub win_rate: f64,
    /// Consecutive wins ending at the most recent game. `None` when the
    /// player's history lacks timestamps and cannot be ordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_streak: Option<u32>,
}

/// Which logs take part in a ranking
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleFilter {
    #[default]
    AllRoles,
    Role(String),
}

impl RoleFilter {
    pub fn role(role: impl Into<String>) -> Self {
        RoleFilter::Role(role.into())
    }

    /// Whether a log with the given role passes this filter
    pub fn matches(&self, role: &str) -> bool {
        match self {
            RoleFilter::AllRoles => true,
            RoleFilter::Role(wanted) => wanted == role,
        }
    }
}

impl std::fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleFilter::AllRoles => write!(f, "{}", ALL_ROLES),
            RoleFilter::Role(role) => write!(f, "{}", role),
        }
    }
}

/// `"ALL"` parses to [`RoleFilter::AllRoles`]; any other text is a role.
impl FromStr for RoleFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_ROLES {
            Ok(RoleFilter::AllRoles)
        } else {
            Ok(RoleFilter::Role(s.to_string()))
        }
    }
}
