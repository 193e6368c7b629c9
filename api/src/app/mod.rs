//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod cache;
pub mod leaderboard;
pub mod leaderboard_service;

pub use leaderboard_service::{CategoryShare, DashboardView, LeaderboardService, TablePage};
