//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod airtable;
pub mod clock;

pub use airtable::AirtableClientImpl;
pub use clock::SystemClock;
