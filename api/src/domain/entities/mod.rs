//! Domain entities
//!
//! `RawRecord` is what the data source hands us; `Entity` and `RankedEntity`
//! are what the leaderboard is built from.

pub mod entity;
pub mod record;

pub use entity::{CategoryTally, Entity, RankedEntity};
pub use record::{FieldMap, FieldValue, RawRecord};
