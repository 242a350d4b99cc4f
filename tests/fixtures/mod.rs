//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use battle_board::error::Result;
use battle_board::source::LogSource;
use battle_board::types::GameLog;
use chrono::{Duration, TimeZone, Utc};
use mockall::mock;

mock! {
    pub Source {}

    #[async_trait]
    impl LogSource for Source {
        async fn fetch_logs(&self) -> Result<Vec<GameLog>>;
        fn describe(&self) -> String;
    }
}

/// RFC 3339 timestamp `minutes` after a fixed season start
pub fn at(minutes: i64) -> String {
    let start = Utc.with_ymd_and_hms(2024, 4, 1, 18, 0, 0).unwrap();
    (start + Duration::minutes(minutes)).to_rfc3339()
}

/// Game log with a name derived from the user id
pub fn game(user_id: &str, role: &str, is_win: bool, minutes: i64) -> GameLog {
    GameLog::new(
        user_id,
        format!("{}_name", user_id),
        role,
        is_win,
        at(minutes),
    )
}

/// A small season of werewolf-style games across three roles
pub fn create_season_logs() -> Vec<GameLog> {
    vec![
        game("alice", "Werewolf", true, 0),
        game("bob", "Villager", false, 0),
        game("carol", "Seer", true, 0),
        game("alice", "Villager", true, 30),
        game("bob", "Werewolf", true, 30),
        game("carol", "Villager", false, 30),
        game("alice", "Seer", false, 60),
        game("bob", "Villager", true, 60),
        game("carol", "Werewolf", true, 60),
        game("alice", "Werewolf", true, 90),
        game("bob", "Seer", true, 90),
        game("carol", "Villager", true, 90),
        game("alice", "Villager", true, 120),
        game("bob", "Werewolf", false, 120),
        game("dave", "Villager", true, 120),
    ]
}

/// Mock source that returns `logs` on every fetch
pub fn mock_source_with(logs: Vec<GameLog>) -> MockSource {
    let mut source = MockSource::new();
    source
        .expect_fetch_logs()
        .returning(move || Ok(logs.clone()));
    source
        .expect_describe()
        .returning(|| "mock source".to_string());
    source
}
