//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Records as fetched and the leaderboard entries derived from them
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
