//! Leaderboard service
//!
//! Fetches records, builds the leaderboard and keeps the result in a TTL cache.
//! Also shapes the dashboard view: top cards, a searchable paginated table and
//! the category distribution.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::cache::TtlCache;
use super::leaderboard::{matches_search, top_n, Leaderboard};
use crate::domain::entities::{FieldMap, RankedEntity};
use crate::domain::ports::{Clock, RecordSource, TableQuery};
use crate::error::AppError;

/// Number of highlighted cards above the table
pub const TOP_CARDS: usize = 3;

/// Maximum number of rows the table shows across all pages
pub const TABLE_SIZE: usize = 25;

/// Rows per table page
pub const PAGE_SIZE: usize = 10;

/// One fetch cycle's result
#[derive(Debug)]
pub struct Snapshot {
    pub leaderboard: Leaderboard,
    pub last_updated: DateTime<Utc>,
}

/// Share of one category in the distribution chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Percent of all agents, one decimal place
    pub percentage: f64,
}

/// One page of the leaderboard table
#[derive(Debug, Clone)]
pub struct TablePage {
    pub rows: Vec<RankedEntity>,
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
    /// Rows across all pages (at most `TABLE_SIZE`)
    pub total_rows: usize,
    pub search: Option<String>,
}

/// Everything the dashboard displays
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub top3: Vec<RankedEntity>,
    pub table: TablePage,
    pub distribution: Vec<CategoryShare>,
    pub total_agents: usize,
    pub last_updated: DateTime<Utc>,
}

/// Service for building and serving the leaderboard
pub struct LeaderboardService {
    source: Arc<dyn RecordSource>,
    query: TableQuery,
    fields: FieldMap,
    clock: Arc<dyn Clock>,
    cache: TtlCache<Arc<Snapshot>>,
}

impl LeaderboardService {
    pub fn new(
        source: Arc<dyn RecordSource>,
        query: TableQuery,
        fields: FieldMap,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            query,
            fields,
            cache: TtlCache::new(clock.clone(), ttl),
            clock,
        }
    }

    /// How long a snapshot stays fresh
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// The current snapshot, fetching a new one if the cached one expired
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, AppError> {
        if let Some(snapshot) = self.cache.get().await {
            tracing::debug!("Leaderboard cache hit");
            return Ok(snapshot);
        }

        tracing::debug!("Leaderboard cache miss");
        self.rebuild().await
    }

    /// Drop the cached snapshot and fetch a new one
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, AppError> {
        self.cache.invalidate().await;
        self.rebuild().await
    }

    async fn rebuild(&self) -> Result<Arc<Snapshot>, AppError> {
        let records = self.source.fetch_records(&self.query).await?;
        tracing::info!(
            "Fetched {} records from {}/{}",
            records.len(),
            self.query.base_id,
            self.query.table
        );

        if !records.is_empty()
            && records.iter().all(|r| r.get(&self.fields.score).is_none())
        {
            let available: BTreeSet<&str> =
                records.iter().flat_map(|r| r.field_names()).collect();
            tracing::warn!(
                "No record has a '{}' field; every score will be zero. Available fields: {:?}",
                self.fields.score,
                available
            );
        }

        let snapshot = Arc::new(Snapshot {
            leaderboard: Leaderboard::build(&records, &self.fields),
            last_updated: self.clock.now(),
        });
        self.cache.put(snapshot.clone()).await;

        Ok(snapshot)
    }

    /// Build the dashboard view
    ///
    /// `search` filters the table only; the cards and the distribution always
    /// cover every agent. `page` is 1-based and clamps to the last page.
    pub async fn dashboard(
        &self,
        search: Option<&str>,
        page: usize,
    ) -> Result<DashboardView, AppError> {
        if page == 0 {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }

        let snapshot = self.snapshot().await?;
        let board = &snapshot.leaderboard;
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        Ok(DashboardView {
            top3: top_n(&board.ranked, TOP_CARDS).to_vec(),
            table: table_page(&board.ranked, search, page),
            distribution: distribution(board),
            total_agents: board.ranked.len(),
            last_updated: snapshot.last_updated,
        })
    }
}

fn table_page(ranked: &[RankedEntity], search: Option<&str>, page: usize) -> TablePage {
    let matching: Vec<&RankedEntity> = ranked
        .iter()
        .filter(|r| search.map_or(true, |term| matches_search(&r.entity, term)))
        .take(TABLE_SIZE)
        .collect();

    let total_pages = matching.len().div_ceil(PAGE_SIZE).max(1);
    let page = page.min(total_pages);

    TablePage {
        rows: matching
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|r| (*r).clone())
            .collect(),
        page,
        total_pages,
        total_rows: matching.len(),
        search: search.map(str::to_string),
    }
}

fn distribution(board: &Leaderboard) -> Vec<CategoryShare> {
    let total = board.tally.total();
    board
        .tally
        .sorted()
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            percentage: percent(count, total),
        })
        .collect()
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}
