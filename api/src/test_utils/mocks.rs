//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::RawRecord;
use crate::domain::ports::{Clock, RecordSource, TableQuery};
use crate::error::AirtableError;

// ============================================================================
// Mock Record Source
// ============================================================================

/// Serves a fixed set of records, or fails every call
#[derive(Default)]
pub struct MockRecordSource {
    records: Vec<RawRecord>,
    should_fail: bool,
    fetches: AtomicUsize,
    last_query: RwLock<Option<TableQuery>>,
}

impl MockRecordSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A source whose every fetch is rejected as unauthorized
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<TableQuery> {
        self.last_query.read().unwrap().clone()
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_records(&self, query: &TableQuery) -> Result<Vec<RawRecord>, AirtableError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.last_query.write().unwrap() = Some(query.clone());

        if self.should_fail {
            return Err(AirtableError::Unauthorized);
        }
        Ok(self.records.clone())
    }
}

// ============================================================================
// Manual Clock
// ============================================================================

/// A clock that only moves when told to
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

/// Starts at 2024-01-01 00:00 UTC
impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: RwLock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_default_matches_new() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), ManualClock::new().now());

        clock.advance(Duration::minutes(90));
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap()
        );
    }
}
