//! Ranking engine
//!
//! Turns a flat list of game logs into per-player statistics sorted by wins.
//! The engine is a pure function of its inputs: it borrows the logs, keeps no
//! state between calls and never fails. Degenerate input is handled by local
//! substitution (fallback names, earliest-instant timestamps).

use crate::ranking::timestamp::sort_key;
use crate::types::{GameLog, PlayerStat, RoleFilter, UNKNOWN_PLAYER_NAME};
use crate::utils::win_rate;
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use tracing::debug;

/// Rank players over the logs that pass `filter`, using the default
/// fallback name
pub fn rank(logs: &[GameLog], filter: &RoleFilter) -> Vec<PlayerStat> {
    RankingEngine::default().rank(logs, filter)
}

/// Every role present in `logs`, after [`RoleFilter::AllRoles`], in order of
/// first appearance
pub fn available_roles(logs: &[GameLog]) -> Vec<RoleFilter> {
    let mut roles = vec![RoleFilter::AllRoles];
    for log in logs {
        let role = RoleFilter::Role(log.role.clone());
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}

/// Aggregates game logs into a ranking
#[derive(Debug, Clone)]
pub struct RankingEngine {
    unknown_name: String,
}

impl RankingEngine {
    /// Create an engine that names anonymous players `unknown_name`
    pub fn new(unknown_name: impl Into<String>) -> Self {
        Self {
            unknown_name: unknown_name.into(),
        }
    }

    /// Name given to players whose most recent log has no display name
    pub fn unknown_name(&self) -> &str {
        &self.unknown_name
    }

    /// Build the ranking for `filter`
    ///
    /// Players are ordered by wins (descending), then name, then user id, so
    /// equal inputs always produce the same order.
    pub fn rank(&self, logs: &[GameLog], filter: &RoleFilter) -> Vec<PlayerStat> {
        let buckets = group_by_player(logs, filter);
        let matched: usize = buckets.iter().map(|(_, bucket)| bucket.len()).sum();

        let mut ranking: Vec<PlayerStat> = buckets
            .into_iter()
            .map(|(user_id, bucket)| self.summarize(user_id, bucket))
            .collect();
        ranking.sort_by(compare_stats);

        debug!(
            "Ranked {} players from {}/{} logs (filter: {})",
            ranking.len(),
            matched,
            logs.len(),
            filter
        );

        ranking
    }

    /// Statistics for one player's filtered history
    fn summarize(&self, user_id: &str, mut history: Vec<&GameLog>) -> PlayerStat {
        // Most recent first. The sort is stable so equal timestamps keep
        // their input order.
        history.sort_by_cached_key(|log| Reverse(sort_key(log.created_at.as_deref())));

        let games = count(history.len());
        let wins = count(history.iter().filter(|log| log.is_win).count());

        let name = history
            .first()
            .and_then(|log| log.user_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.unknown_name)
            .to_string();

        let current_streak = if history.iter().all(|log| log.created_at.is_some()) {
            Some(count(history.iter().take_while(|log| log.is_win).count()))
        } else {
            None
        };

        PlayerStat {
            user_id: user_id.to_string(),
            name,
            wins,
            games,
            win_rate: win_rate(wins, games),
            current_streak,
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(UNKNOWN_PLAYER_NAME)
    }
}

/// Filtered logs grouped by user id, in order of each player's first log
fn group_by_player<'a>(
    logs: &'a [GameLog],
    filter: &RoleFilter,
) -> Vec<(&'a str, Vec<&'a GameLog>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(&str, Vec<&GameLog>)> = Vec::new();

    for log in logs.iter().filter(|log| filter.matches(&log.role)) {
        let slot = *index.entry(log.user_id.as_str()).or_insert_with(|| {
            buckets.push((log.user_id.as_str(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(log);
    }

    buckets
}

fn compare_stats(a: &PlayerStat, b: &PlayerStat) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(user: &str, role: &str, is_win: bool, t: u32) -> GameLog {
        GameLog::new(
            user,
            format!("{}-name", user),
            role,
            is_win,
            format!("2024-01-01T00:00:{:02}Z", t),
        )
    }

    fn find<'a>(ranking: &'a [PlayerStat], user_id: &str) -> &'a PlayerStat {
        ranking
            .iter()
            .find(|stat| stat.user_id == user_id)
            .expect("player missing from ranking")
    }

    #[test]
    fn test_streak_counts_from_most_recent_game() {
        let logs = vec![
            log("p1", "Wolf", true, 3),
            log("p1", "Wolf", true, 2),
            log("p1", "Wolf", false, 1),
        ];

        let ranking = rank(&logs, &RoleFilter::AllRoles);

        assert_eq!(ranking.len(), 1);
        let p1 = &ranking[0];
        assert_eq!(p1.games, 3);
        assert_eq!(p1.wins, 2);
        assert_eq!(format!("{:.1}", p1.win_rate), "66.7");
        assert_eq!(p1.current_streak, Some(2));
    }

    #[test]
    fn test_recent_loss_breaks_streak() {
        let logs = vec![log("p1", "Wolf", false, 2), log("p1", "Wolf", true, 1)];

        let ranking = rank(&logs, &RoleFilter::AllRoles);

        assert_eq!(ranking[0].current_streak, Some(0));
    }

    #[test]
    fn test_out_of_order_input_is_sorted_before_streak() {
        // Oldest game listed first; input order must not decide the streak
        let logs = vec![
            log("p1", "Wolf", false, 1),
            log("p1", "Wolf", true, 5),
            log("p1", "Wolf", true, 4),
            log("p1", "Wolf", true, 3),
        ];

        let ranking = rank(&logs, &RoleFilter::AllRoles);

        assert_eq!(ranking[0].current_streak, Some(3));
    }

    #[test]
    fn test_empty_input() {
        let ranking = rank(&[], &RoleFilter::AllRoles);
        assert!(ranking.is_empty());
        assert_eq!(available_roles(&[]), vec![RoleFilter::AllRoles]);
    }

    #[test]
    fn test_unknown_role_yields_empty_ranking() {
        let logs = vec![log("p1", "Wolf", true, 1)];
        assert!(rank(&logs, &RoleFilter::role("Hunter")).is_empty());
    }

    #[test]
    fn test_role_filter_is_exact() {
        let logs = vec![
            log("p1", "Wolf", true, 1),
            log("p1", "wolf", true, 2),
            log("p1", "Villager", false, 3),
            log("p2", "Villager", true, 4),
        ];

        let wolves = rank(&logs, &RoleFilter::role("Wolf"));
        assert_eq!(wolves.len(), 1);
        assert_eq!(wolves[0].games, 1);

        let villagers = rank(&logs, &RoleFilter::role("Villager"));
        assert_eq!(villagers.len(), 2);
        assert_eq!(find(&villagers, "p1").wins, 0);
        assert_eq!(find(&villagers, "p2").wins, 1);

        let all = rank(&logs, &RoleFilter::AllRoles);
        assert_eq!(find(&all, "p1").games, 3);
    }

    #[test]
    fn test_filter_applies_before_streak() {
        // The loss is in another role, so the Wolf streak is unbroken
        let logs = vec![
            log("p1", "Villager", false, 3),
            log("p1", "Wolf", true, 2),
            log("p1", "Wolf", true, 1),
        ];

        assert_eq!(
            rank(&logs, &RoleFilter::role("Wolf"))[0].current_streak,
            Some(2)
        );
        assert_eq!(rank(&logs, &RoleFilter::AllRoles)[0].current_streak, Some(0));
    }

    #[test]
    fn test_sorted_by_wins_then_name() {
        let logs = vec![
            GameLog::new("a", "Zed", "Wolf", true, "2024-01-01T00:00:01Z"),
            GameLog::new("b", "Amy", "Wolf", true, "2024-01-01T00:00:02Z"),
            GameLog::new("c", "Bob", "Wolf", true, "2024-01-01T00:00:03Z"),
            GameLog::new("c", "Bob", "Wolf", true, "2024-01-01T00:00:04Z"),
            GameLog::new("d", "Cat", "Wolf", false, "2024-01-01T00:00:05Z"),
        ];

        let names: Vec<_> = rank(&logs, &RoleFilter::AllRoles)
            .into_iter()
            .map(|stat| stat.name)
            .collect();

        assert_eq!(names, vec!["Bob", "Amy", "Zed", "Cat"]);
    }

    #[test]
    fn test_equal_names_fall_back_to_user_id() {
        let logs = vec![
            GameLog::new("u2", "Sam", "Wolf", true, "2024-01-01T00:00:01Z"),
            GameLog::new("u1", "Sam", "Wolf", true, "2024-01-01T00:00:02Z"),
        ];

        let ids: Vec<_> = rank(&logs, &RoleFilter::AllRoles)
            .into_iter()
            .map(|stat| stat.user_id)
            .collect();

        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[test]
    fn test_name_comes_from_most_recent_log() {
        let logs = vec![
            GameLog::new("p1", "NewName", "Wolf", true, "2024-03-01T00:00:00Z"),
            GameLog::new("p1", "OldName", "Wolf", true, "2024-01-01T00:00:00Z"),
            GameLog::new("p1", "MiddleName", "Wolf", true, "2024-02-01T00:00:00Z"),
        ];

        assert_eq!(rank(&logs, &RoleFilter::AllRoles)[0].name, "NewName");
    }

    #[test]
    fn test_missing_name_uses_fallback() {
        let mut empty = log("p1", "Wolf", true, 2);
        empty.user_name = Some(String::new());
        let mut absent = log("p2", "Wolf", true, 1);
        absent.user_name = None;
        // An older named log does not rescue an unnamed recent one
        let older = GameLog::new("p2", "Named", "Wolf", true, "2023-01-01T00:00:00Z");

        let ranking = rank(&[empty, absent, older], &RoleFilter::AllRoles);
        assert_eq!(find(&ranking, "p1").name, UNKNOWN_PLAYER_NAME);
        assert_eq!(find(&ranking, "p2").name, UNKNOWN_PLAYER_NAME);

        let engine = RankingEngine::new("???");
        let ranking = engine.rank(&[log("p3", "Wolf", true, 1)], &RoleFilter::AllRoles);
        assert_eq!(ranking[0].name, "p3-name");
        let mut unnamed = log("p4", "Wolf", true, 1);
        unnamed.user_name = None;
        assert_eq!(engine.rank(&[unnamed], &RoleFilter::AllRoles)[0].name, "???");
    }

    #[test]
    fn test_malformed_timestamps_sort_as_oldest() {
        let mut broken = log("p1", "Wolf", false, 0);
        broken.created_at = Some("not a timestamp".to_string());
        let logs = vec![broken, log("p1", "Wolf", true, 2), log("p1", "Wolf", true, 1)];

        let ranking = rank(&logs, &RoleFilter::AllRoles);

        assert_eq!(ranking[0].games, 3);
        assert_eq!(ranking[0].current_streak, Some(2));
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let logs = vec![
            GameLog::new("p1", "First", "Wolf", false, "2024-01-01T00:00:00Z"),
            GameLog::new("p1", "Second", "Wolf", true, "2024-01-01T00:00:00Z"),
        ];

        let stat = &rank(&logs, &RoleFilter::AllRoles)[0];
        assert_eq!(stat.name, "First");
        assert_eq!(stat.current_streak, Some(0));
    }

    #[test]
    fn test_streak_absent_without_timestamps() {
        let mut undated = log("p1", "Wolf", true, 0);
        undated.created_at = None;
        let logs = vec![undated, log("p1", "Wolf", true, 1), log("p2", "Wolf", true, 1)];

        let ranking = rank(&logs, &RoleFilter::AllRoles);

        let p1 = find(&ranking, "p1");
        assert_eq!(p1.current_streak, None);
        assert_eq!(p1.wins, 2);
        assert_eq!(p1.win_rate, 100.0);
        assert_eq!(find(&ranking, "p2").current_streak, Some(1));
    }

    #[test]
    fn test_source_logs_are_untouched() {
        let logs = vec![log("p1", "Wolf", false, 1), log("p1", "Wolf", true, 2)];
        let before = logs.clone();

        let _ = rank(&logs, &RoleFilter::AllRoles);

        assert_eq!(logs, before);
    }

    #[test]
    fn test_available_roles_first_seen_order() {
        let logs = vec![
            log("p1", "Wolf", true, 1),
            log("p2", "Seer", true, 2),
            log("p3", "Wolf", false, 3),
            log("p4", "Villager", true, 4),
            log("p5", "ALL", true, 5),
        ];

        assert_eq!(
            available_roles(&logs),
            vec![
                RoleFilter::AllRoles,
                RoleFilter::role("Wolf"),
                RoleFilter::role("Seer"),
                RoleFilter::role("Villager"),
                RoleFilter::role("ALL"),
            ]
        );
    }

    #[test]
    fn test_empty_history_is_defensive() {
        let stat = RankingEngine::default().summarize("ghost", Vec::new());
        assert_eq!(stat.games, 0);
        assert_eq!(stat.win_rate, 0.0);
        assert_eq!(stat.name, UNKNOWN_PLAYER_NAME);
        assert_eq!(stat.current_streak, Some(0));
    }
}
