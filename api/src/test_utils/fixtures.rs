//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{FieldValue, RawRecord};
use crate::domain::ports::TableQuery;

/// A record with the default leaderboard fields set
pub fn agent_record(name: &str, firm: &str, earned: f64) -> RawRecord {
    [
        ("Name", FieldValue::from(name)),
        ("Firm", FieldValue::from(firm)),
        ("Referral Earned", FieldValue::from(earned)),
    ]
    .into_iter()
    .collect()
}

/// A mixed table: ties, text scores, missing and junk values
pub fn sample_records() -> Vec<RawRecord> {
    vec![
        agent_record("Ada", "Acme", 1200.0).with_id("rec1"),
        agent_record("Bob", "Globex", 300.0).with_id("rec2"),
        [("Name", "Cy"), ("Firm", "Acme"), ("Referral Earned", "950.25")]
            .into_iter()
            .collect::<RawRecord>()
            .with_id("rec3"),
        [("Name", "Di"), ("Firm", "Initech")]
            .into_iter()
            .collect::<RawRecord>()
            .with_id("rec4"),
        [("Name", "Ed"), ("Firm", "Globex"), ("Referral Earned", "N/A")]
            .into_iter()
            .collect::<RawRecord>()
            .with_id("rec5"),
        agent_record("Flo", "Acme", 300.0).with_id("rec6"),
    ]
}

pub fn test_query() -> TableQuery {
    TableQuery {
        base_id: "appTEST".to_string(),
        table: "Agents".to_string(),
        view: Some("Grid view".to_string()),
    }
}
