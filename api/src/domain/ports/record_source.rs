//! Record source port trait
//!
//! Defines the interface for fetching raw records from the hosted table service.

use async_trait::async_trait;

use crate::domain::entities::RawRecord;
use crate::error::AirtableError;

/// Which table to read, and through which view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub base_id: String,
    pub table: String,
    /// View name; `None` reads the table unfiltered
    pub view: Option<String>,
}

/// Port trait for fetching records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the records of one table
    ///
    /// Only successfully parsed records are returned; transport, auth and
    /// parse failures surface as errors.
    async fn fetch_records(&self, query: &TableQuery) -> Result<Vec<RawRecord>, AirtableError>;
}
