//! HTTP client for the TMDB upstream API
//!
//! One `TmdbClient` is constructed at startup and handed to every caller;
//! `reqwest::Client` is a cheap handle over a shared connection pool, so
//! clones share the same resource. Each call attaches the configured API
//! key as a query parameter and returns the raw TMDB JSON for the caller
//! to normalize. Failures map onto [`UpstreamError`] and are never retried.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::error::{UpstreamError, UpstreamResult};

/// Shared client for TMDB requests
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new client with a fixed request deadline
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Configuration)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a new client from application settings
    pub fn from_settings(settings: &Settings) -> UpstreamResult<Self> {
        Self::new(
            &settings.tmdb_api_key,
            &settings.tmdb_base_url,
            Duration::from_secs(settings.tmdb_timeout_seconds),
        )
    }

    /// Return popular movies page from TMDB
    pub async fn popular(&self, page: u32) -> UpstreamResult<Value> {
        self.get("/movie/popular", &[("page", page.to_string())])
            .await
    }

    /// Return top-rated movies page from TMDB
    pub async fn top_rated(&self, page: u32) -> UpstreamResult<Value> {
        self.get("/movie/top_rated", &[("page", page.to_string())])
            .await
    }

    /// Return movie details for a specific movie id
    pub async fn movie_detail(&self, movie_id: i64) -> UpstreamResult<Value> {
        self.get(&format!("/movie/{movie_id}"), &[]).await
    }

    /// Search movies by keyword and return the results page
    pub async fn search(&self, query: &str, page: u32) -> UpstreamResult<Value> {
        self.get(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// Return recommendations for a given movie id
    pub async fn recommendations(&self, movie_id: i64, page: u32) -> UpstreamResult<Value> {
        self.get(
            &format!("/movie/{movie_id}/recommendations"),
            &[("page", page.to_string())],
        )
        .await
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> UpstreamResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("TMDB request: {}", path);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(e)
                } else {
                    UpstreamError::Unreachable(e)
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(UpstreamError::MalformedBody)
    }
}

/// Pull a human-readable message out of a TMDB error body, preferring the
/// structured `status_message` field, then `message`, then the raw text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| {
            payload
                .get("status_message")
                .or_else(|| payload.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
