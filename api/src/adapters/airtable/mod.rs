//! Airtable adapter
//!
//! Implementation of the record source for the Airtable REST API.

pub mod client;

pub use client::AirtableClientImpl;
