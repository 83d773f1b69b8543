//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::UpstreamError;
use serde_json::json;
use thiserror::Error;

use crate::jwt::TokenError;

/// Custom error type for the API service
///
/// Identity failures (bad credentials, duplicate email) are not errors:
/// the auth routes answer those as `{success: false, message}` payloads.
/// Token verification is the one exception and raises 401 here.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Session token past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Any other token decode or signature failure
    #[error("Invalid token")]
    TokenInvalid,

    /// Upstream (TMDB) failure, surfaced unchanged to the route boundary
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::TokenExpired,
            TokenError::Invalid => ApiError::TokenInvalid,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            ApiError::TokenInvalid => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            ApiError::Upstream(err) => (upstream_status(&err), err.to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Map the upstream failure classes onto HTTP statuses: 504 for timeouts,
/// 502 for transport and body failures, passthrough for upstream statuses.
fn upstream_status(err: &UpstreamError) -> StatusCode {
    match err {
        UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        UpstreamError::Unreachable(_)
        | UpstreamError::MalformedBody(_)
        | UpstreamError::Configuration(_) => StatusCode::BAD_GATEWAY,
        UpstreamError::Status { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
