//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The mocks are hand-written rather than generated: they are small, and tests
//! need to inspect them afterwards (fetch counts) or drive them (the clock).

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
