//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod leaderboard;

pub use leaderboard::{get_dashboard, list_agents, refresh};
