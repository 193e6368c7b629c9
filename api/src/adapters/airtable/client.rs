//! Airtable API client implementation

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{FieldValue, RawRecord};
use crate::domain::ports::{RecordSource, TableQuery};
use crate::error::AirtableError;

/// Implementation of the Airtable records client
pub struct AirtableClientImpl {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AirtableClientImpl {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self, query: &TableQuery) -> String {
        format!(
            "{}/v0/{}/{}",
            self.base_url,
            encode(&query.base_id),
            encode(&query.table)
        )
    }

    fn headers(&self) -> Result<HeaderMap, AirtableError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| AirtableError::Unauthorized)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AirtableError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AirtableError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(status_error(status.as_u16(), message))
        }
    }
}

fn status_error(status: u16, message: String) -> AirtableError {
    match status {
        401 | 403 => AirtableError::Unauthorized,
        404 => AirtableError::NotFound,
        429 => AirtableError::RateLimited,
        _ => AirtableError::Api { status, message },
    }
}

/// Response types from Airtable API
#[derive(Deserialize)]
struct ListRecordsResponse {
    #[serde(default)]
    records: Vec<AirtableRecordResponse>,
    /// Present when further pages exist
    offset: Option<String>,
}

#[derive(Deserialize)]
struct AirtableRecordResponse {
    id: Option<String>,
    #[serde(rename = "createdTime")]
    created_time: Option<String>,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
}

impl From<AirtableRecordResponse> for RawRecord {
    fn from(r: AirtableRecordResponse) -> Self {
        let mut record = RawRecord::new(r.fields);
        if let Some(id) = r.id {
            record = record.with_id(id);
        }
        record.created_time = r.created_time;
        record
    }
}

#[async_trait]
impl RecordSource for AirtableClientImpl {
    async fn fetch_records(&self, query: &TableQuery) -> Result<Vec<RawRecord>, AirtableError> {
        let url = self.table_url(query);
        tracing::debug!("GET {} (view: {:?})", url, query.view);

        let mut request = self.http.get(&url).headers(self.headers()?);
        if let Some(view) = &query.view {
            request = request.query(&[("view", view)]);
        }

        let response = request.send().await?;
        let body: ListRecordsResponse = self.handle_response(response).await?;

        if body.offset.is_some() {
            tracing::warn!(
                "{}/{} has more records than one page; only the first {} are used",
                query.base_id,
                query.table,
                body.records.len()
            );
        }

        Ok(body.records.into_iter().map(RawRecord::from).collect())
    }
}
