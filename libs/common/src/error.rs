//! Custom error types for the common library
//!
//! This module defines the failure taxonomy for the TMDB upstream client.
//! Every failure is surfaced immediately to the caller; no retries or
//! backoff happen at this layer.

use thiserror::Error;

/// Custom error type for upstream (TMDB) operations
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream did not respond within the configured deadline
    #[error("TMDB request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Connection-level failure reaching upstream
    #[error("Error connecting to TMDB: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Upstream answered with a non-200 status
    #[error("TMDB error: {message}")]
    Status { status: u16, message: String },

    /// Upstream answered 200 but the body was not parseable JSON
    #[error("Invalid JSON from TMDB: {0}")]
    MalformedBody(#[source] reqwest::Error),

    /// Client configuration error
    #[error("TMDB client configuration error: {0}")]
    Configuration(#[source] reqwest::Error),
}

/// Type alias for Result with UpstreamError
pub type UpstreamResult<T> = Result<T, UpstreamError>;
