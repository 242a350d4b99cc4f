//! Presentation of rankings

pub mod board;

pub use board::{
    is_hot_streak, render_json, render_roles, render_table, role_label, HOT_STREAK_THRESHOLD,
};
