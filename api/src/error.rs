//! Unified error types for the leaderboard API
//!
//! This module defines error types for each layer:
//! - `AirtableError`: Airtable API client errors
//! - `ConfigError`: Startup configuration errors
//! - `AppError`: Application layer errors (mapped to HTTP responses)
//!
//! The leaderboard pipeline itself has no error type: every input is valid.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Airtable API client errors
#[derive(Debug, Error)]
pub enum AirtableError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - check the API key and its base permissions")]
    Unauthorized,

    #[error("Base or table not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Airtable error: {0}")]
    Airtable(#[from] AirtableError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Airtable(e) => {
                tracing::error!("Airtable error: {}", e);
                match e {
                    AirtableError::Unauthorized => (
                        StatusCode::BAD_GATEWAY,
                        "Data source not authorized",
                        Some("NOT_AUTHORIZED".to_string()),
                    ),
                    AirtableError::NotFound => {
                        (StatusCode::BAD_GATEWAY, "Data source table not found", None)
                    }
                    AirtableError::RateLimited => {
                        (StatusCode::SERVICE_UNAVAILABLE, "Rate limited", None)
                    }
                    AirtableError::Api { message, .. } => (
                        StatusCode::BAD_GATEWAY,
                        "Failed to fetch agent data",
                        Some(message.clone()),
                    ),
                    AirtableError::Request(_) | AirtableError::Deserialization(_) => {
                        (StatusCode::BAD_GATEWAY, "Failed to fetch agent data", None)
                    }
                }
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
