//! Text and JSON renderings of a ranking
//!
//! Rendering only consumes computed [`PlayerStat`]s; nothing here feeds back
//! into the ranking.

use crate::error::Result;
use crate::types::{PlayerStat, RoleFilter};
use std::fmt::Write;

/// Streaks of at least this many wins are highlighted as hot
pub const HOT_STREAK_THRESHOLD: u32 = 2;

const TITLE: &str = "BATTLE DATA";
const EMPTY_MESSAGE: &str = "NO DATA FOUND";

/// Whether a player's current streak is highlighted
pub fn is_hot_streak(stat: &PlayerStat) -> bool {
    stat.current_streak.is_some_and(|streak| streak >= HOT_STREAK_THRESHOLD)
}

/// Button label for a role filter
pub fn role_label(filter: &RoleFilter) -> String {
    match filter {
        RoleFilter::AllRoles => "ALL LOGS".to_string(),
        RoleFilter::Role(role) => role.to_uppercase(),
    }
}

/// Streak cell: the flame marker for hot streaks, a dash otherwise
pub fn streak_cell(stat: &PlayerStat) -> String {
    match stat.current_streak {
        Some(streak) if streak >= HOT_STREAK_THRESHOLD => format!("🔥 {}", streak),
        _ => "-".to_string(),
    }
}

/// Render the ranking as a fixed-width text table
pub fn render_table(ranking: &[PlayerStat], filter: &RoleFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "[{}]", role_label(filter));
    let _ = writeln!(out);

    if ranking.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        return out;
    }

    let name_width = ranking
        .iter()
        .map(|stat| stat.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("PLAYER".len());

    let _ = writeln!(
        out,
        "{:<6}{:<name_width$}  {:>9}  {:>7}  {}",
        "RANK", "PLAYER", "WINS", "RATE", "STREAK"
    );

    for (index, stat) in ranking.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<6}{:<name_width$}  {:>9}  {:>7}  {}",
            format!("#{}", index + 1),
            stat.name,
            format!("{}/{}", stat.wins, stat.games),
            format!("{:.1}%", stat.win_rate),
            streak_cell(stat)
        );
    }

    out
}

/// Render the ranking as a pretty-printed JSON array
pub fn render_json(ranking: &[PlayerStat]) -> Result<String> {
    Ok(serde_json::to_string_pretty(ranking)?)
}

/// One role label per line, in the given order
pub fn render_roles(roles: &[RoleFilter]) -> String {
    roles
        .iter()
        .map(|filter| format!("{}\t{}\n", filter, role_label(filter)))
        .collect()
}
