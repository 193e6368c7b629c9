//! HTTP client for the Airtable records API
//!
//! Read-only and single-shot: one GET per run, no paging.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use urlencoding::encode;

/// The table to inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub base_id: String,
    pub table: String,
    pub view: Option<String>,
}

impl Target {
    /// Read the target from environment variables
    ///
    /// Required env vars:
    /// - AIRTABLE_BASE_ID: The base to read (e.g. appXXXXXXXXXXXX)
    /// - AIRTABLE_TABLE_NAME: The table name (e.g. Agents)
    ///
    /// Optional:
    /// - AIRTABLE_VIEW: Restrict to one view; unset or empty reads the whole table
    pub fn from_env() -> Result<Self> {
        let base_id = required_env("AIRTABLE_BASE_ID")?;
        let table = required_env("AIRTABLE_TABLE_NAME")?;
        let view = std::env::var("AIRTABLE_VIEW")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            base_id,
            table,
            view,
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{} not set", key))
}

/// HTTP client for the Airtable API
#[derive(Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    base_url: String,
}

impl AirtableClient {
    /// Create a new client from environment variables
    ///
    /// Required env vars:
    /// - AIRTABLE_API_KEY: A personal access token with read access to the base
    ///
    /// Optional:
    /// - AIRTABLE_API_URL: Base URL of the API (default https://api.airtable.com)
    pub fn from_env() -> Result<Self> {
        let api_key = required_env("AIRTABLE_API_KEY")?;
        let base_url = std::env::var("AIRTABLE_API_URL")
            .unwrap_or_else(|_| "https://api.airtable.com".to_string());

        Self::new(&base_url, &api_key)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn table_url(&self, target: &Target) -> String {
        format!(
            "{}/v0/{}/{}",
            self.base_url,
            encode(&target.base_id),
            encode(&target.table)
        )
    }

    /// Fetch the table and return the response body as JSON
    pub async fn list_records(&self, target: &Target) -> Result<Value> {
        let url = self.table_url(target);
        tracing::info!("GET {}", url);
        if let Some(view) = &target.view {
            tracing::info!("Params: view={}", view);
        }

        let mut request = self.client.get(&url);
        if let Some(view) = &target.view {
            request = request.query(&[("view", view)]);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", url))?;
        let status = response.status();
        tracing::info!("Response status: {}", status);

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            anyhow::bail!("HTTP error ({}): {}", status, body);
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse JSON response:\n{}", body))
    }
}

/// Every field name that appears in any record, sorted
pub fn unique_field_names(response: &Value) -> BTreeSet<String> {
    response
        .get("records")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|record| record.get("fields").and_then(Value::as_object))
        .flat_map(|fields| fields.keys().cloned())
        .collect()
}

/// Number of records in the response
pub fn record_count(response: &Value) -> usize {
    response
        .get("records")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
