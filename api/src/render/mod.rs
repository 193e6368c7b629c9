//! Render module
//!
//! Markdown rendering of the leaderboard dashboard.

pub mod dashboard;

pub use dashboard::render_dashboard;
