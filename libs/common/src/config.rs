//! Application settings loaded from environment variables

use anyhow::Result;
use std::env;

/// Settings shared by the whole process
#[derive(Debug, Clone)]
pub struct Settings {
    /// TMDB API credential, attached to every upstream request
    pub tmdb_api_key: String,
    /// TMDB API base URL
    pub tmdb_base_url: String,
    /// Base URL prepended to poster paths
    pub tmdb_image_base_url: String,
    /// Fixed deadline for upstream requests, in seconds
    pub tmdb_timeout_seconds: u64,
    /// Allowed frontend origins for CORS
    pub frontend_origins: Vec<String>,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub jwt_expires_seconds: u64,
    /// Socket address the server binds to
    pub bind_addr: String,
}

impl Settings {
    /// Create Settings from environment variables
    ///
    /// # Environment Variables
    /// - `TMDB_API_KEY`: upstream API credential (required)
    /// - `TMDB_BASE_URL`: upstream base URL (default: TMDB v3)
    /// - `TMDB_IMAGE_BASE_URL`: poster image base (default: w500 size)
    /// - `TMDB_TIMEOUT_SECONDS`: upstream request deadline (default: 10)
    /// - `FRONTEND_ORIGIN`: comma-separated allowed origins
    /// - `JWT_SECRET`: token signing secret (default: "changeme")
    /// - `JWT_EXPIRES_SECONDS`: token lifetime (default: 86400)
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:8000")
    pub fn from_env() -> Result<Self> {
        let tmdb_api_key = env::var("TMDB_API_KEY")
            .map_err(|_| anyhow::anyhow!("TMDB_API_KEY environment variable not set"))?;

        let tmdb_base_url = env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());

        let tmdb_image_base_url = env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p/w500".to_string());

        let tmdb_timeout_seconds = env::var("TMDB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let frontend_origins = match env::var("FRONTEND_ORIGIN") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        };

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "changeme".to_string());

        let jwt_expires_seconds = env::var("JWT_EXPIRES_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60 * 60 * 24);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        Ok(Self {
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_timeout_seconds,
            frontend_origins,
            jwt_secret,
            jwt_expires_seconds,
            bind_addr,
        })
    }
}
