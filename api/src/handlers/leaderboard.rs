//! Leaderboard handlers
//!
//! Endpoints for the ranked agent list and the dashboard view.
//! The dashboard supports content negotiation: Accept: application/json for
//! JSON, otherwise markdown.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::{CategoryShare, DashboardView, TablePage};
use crate::domain::entities::RankedEntity;
use crate::error::AppError;
use crate::render::render_dashboard;
use crate::AppState;

/// How long shared caches may serve a stale list while revalidating
const STALE_WHILE_REVALIDATE_SECS: i64 = 60 * 60;

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// One agent in the ranked list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub rank: usize,
    pub agent_name: String,
    pub agency: String,
    pub earnings: f64,
}

impl From<&RankedEntity> for AgentResponse {
    fn from(r: &RankedEntity) -> Self {
        Self {
            rank: r.rank,
            agent_name: r.entity.name.clone(),
            agency: r.entity.category.clone(),
            earnings: r.entity.score.value(),
        }
    }
}

/// Response body for GET /api/agents
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentsResponse {
    pub agents: Vec<AgentResponse>,
    pub last_updated: DateTime<Utc>,
}

/// One page of the dashboard table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePageResponse {
    pub rows: Vec<AgentResponse>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl From<&TablePage> for TablePageResponse {
    fn from(t: &TablePage) -> Self {
        Self {
            rows: t.rows.iter().map(AgentResponse::from).collect(),
            page: t.page,
            total_pages: t.total_pages,
            total_rows: t.total_rows,
            search: t.search.clone(),
        }
    }
}

/// JSON body for GET /leaderboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub top3: Vec<AgentResponse>,
    pub table: TablePageResponse,
    pub distribution: Vec<CategoryShare>,
    pub total_agents: usize,
    pub last_updated: DateTime<Utc>,
}

impl From<&DashboardView> for DashboardResponse {
    fn from(view: &DashboardView) -> Self {
        Self {
            top3: view.top3.iter().map(AgentResponse::from).collect(),
            table: TablePageResponse::from(&view.table),
            distribution: view.distribution.clone(),
            total_agents: view.total_agents,
            last_updated: view.last_updated,
        }
    }
}

/// Response body for POST /api/refresh
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub agents: usize,
    pub last_updated: DateTime<Utc>,
}

/// Dashboard query params
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

fn cache_headers(ttl_secs: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let shared = format!(
        "public, s-maxage={}, stale-while-revalidate={}",
        ttl_secs, STALE_WHILE_REVALIDATE_SECS
    );
    if let Ok(value) = HeaderValue::from_str(&shared) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", ttl_secs)) {
        headers.insert(HeaderName::from_static("cdn-cache-control"), value);
    }
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers
}

/// GET /api/agents
///
/// Every agent, ranked by referral earnings. Errors are marked uncacheable.
pub async fn list_agents(State(state): State<AppState>) -> Response {
    match state.leaderboard.snapshot().await {
        Ok(snapshot) => {
            let body = AgentsResponse {
                agents: snapshot
                    .leaderboard
                    .ranked
                    .iter()
                    .map(AgentResponse::from)
                    .collect(),
                last_updated: snapshot.last_updated,
            };
            let ttl_secs = state.leaderboard.cache_ttl().num_seconds();
            (cache_headers(ttl_secs), Json(body)).into_response()
        }
        Err(e) => ([(header::CACHE_CONTROL, "no-store")], e).into_response(),
    }
}

/// GET /leaderboard
///
/// The dashboard: top 3 cards, a searchable top 25 table and the firm
/// distribution.
/// - Accept: application/json → JSON response
/// - Otherwise → Markdown
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let view = state
        .leaderboard
        .dashboard(params.search.as_deref(), params.page)
        .await?;

    if wants_json(&headers) {
        Ok(Json(DashboardResponse::from(&view)).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_dashboard(&view),
        )
            .into_response())
    }
}

/// POST /api/refresh
///
/// Drop the cached snapshot and fetch the table again.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = state.leaderboard.refresh().await?;
    tracing::info!("Leaderboard refreshed on request");

    Ok(Json(RefreshResponse {
        agents: snapshot.leaderboard.ranked.len(),
        last_updated: snapshot.last_updated,
    }))
}
