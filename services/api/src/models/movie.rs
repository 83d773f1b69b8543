//! Normalized movie shapes and the adapter from raw TMDB records
//!
//! TMDB mixes movie and TV naming in the same result lists (`title` vs
//! `name`, `release_date` vs `first_air_date`), so normalization maps both
//! onto one canonical shape. These values are derived on every fetch and
//! never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical movie shape exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Normalize one raw TMDB record
    ///
    /// Total over any JSON object carrying at least an `id`: absent optional
    /// fields become `None`, never a panic. `poster_url` is present exactly
    /// when `poster_path` is, and is `image_base` + `poster_path`.
    pub fn normalize(raw: &Value, image_base: &str) -> Self {
        let poster_path = str_field(raw, "poster_path");
        let poster_url = poster_path
            .as_deref()
            .map(|path| format!("{image_base}{path}"));

        Movie {
            id: raw.get("id").and_then(Value::as_i64).unwrap_or_default(),
            title: str_field(raw, "title").or_else(|| str_field(raw, "name")),
            overview: str_field(raw, "overview"),
            poster_path,
            poster_url,
            release_date: str_field(raw, "release_date")
                .or_else(|| str_field(raw, "first_air_date")),
            vote_average: raw.get("vote_average").and_then(Value::as_f64),
        }
    }
}

/// One page of normalized movies, re-shaped from a TMDB paginated response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl MoviePage {
    /// The page returned without consulting upstream at all
    pub fn empty() -> Self {
        MoviePage {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    /// Normalize a raw TMDB page, preserving upstream result order
    pub fn normalize(raw: &Value, image_base: &str) -> Self {
        let results = raw
            .get("results")
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .map(|record| Movie::normalize(record, image_base))
                    .collect()
            })
            .unwrap_or_default();

        MoviePage {
            page: raw.get("page").and_then(Value::as_u64).unwrap_or(1) as u32,
            results,
            total_pages: raw.get("total_pages").and_then(Value::as_u64).unwrap_or(0) as u32,
            total_results: raw
                .get("total_results")
                .and_then(Value::as_u64)
                .unwrap_or(0),
        }
    }
}

fn str_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}
