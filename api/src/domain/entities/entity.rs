//! Leaderboard entity
//!
//! A normalized record ready to be ranked, and the ranked form of it.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::record::FieldValue;

/// A finite leaderboard score
///
/// Construction never fails: non-numeric and non-finite input becomes zero.
/// Negative zero is folded into zero so equal-looking scores compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value + 0.0)
        } else {
            Self::ZERO
        }
    }

    /// Coerce an optional field value into a score
    pub fn coerce(value: Option<&FieldValue>) -> Self {
        value
            .and_then(FieldValue::as_number)
            .map(Self::new)
            .unwrap_or(Self::ZERO)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for Score {}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A normalized leaderboard entry, not yet ranked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    pub category: String,
    pub score: Score,
}

/// An entity with its 1-based position in descending score order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub rank: usize,
    #[serde(flatten)]
    pub entity: Entity,
}

/// Number of entities per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTally(HashMap<String, usize>);

impl CategoryTally {
    pub fn add(&mut self, category: &str) {
        *self.0.entry(category.to_string()).or_insert(0) += 1;
    }

    /// Count for `category`; zero when it never occurred
    pub fn get(&self, category: &str) -> usize {
        self.0.get(category).copied().unwrap_or(0)
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Entries by count descending, then category ascending
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
