//! Leaderboard service
//!
//! Glues a log source, the ranking engine and the ranking cache together.

pub mod board;

pub use board::{Leaderboard, LogSnapshot};
