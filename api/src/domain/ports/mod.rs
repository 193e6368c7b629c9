//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod clock;
pub mod record_source;

pub use clock::Clock;
pub use record_source::{RecordSource, TableQuery};
