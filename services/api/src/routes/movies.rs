//! Movie catalog routes
//!
//! Thin orchestration over the TMDB client and the normalizer; upstream
//! failures propagate unchanged to the route boundary as typed errors.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{Movie, MoviePage};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/popular", get(popular))
        .route("/top_rated", get(top_rated))
        .route("/search", get(search))
        .route("/user/:user_id/recommendations", get(user_recommendations))
        .route("/:movie_id/recommendations", get(movie_recommendations))
        .route("/:movie_id", get(movie_details))
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub page: Option<u32>,
}

/// Popular movies page
pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<MoviePage>> {
    let raw = state.tmdb.popular(query.page()).await?;
    Ok(Json(MoviePage::normalize(
        &raw,
        &state.settings.tmdb_image_base_url,
    )))
}

/// Top-rated movies page
pub async fn top_rated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<MoviePage>> {
    let raw = state.tmdb.top_rated(query.page()).await?;
    Ok(Json(MoviePage::normalize(
        &raw,
        &state.settings.tmdb_image_base_url,
    )))
}

/// Keyword search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<MoviePage>> {
    if query.q.is_empty() {
        return Err(ApiError::BadRequest("q must not be empty".to_string()));
    }

    let page = query.page.unwrap_or(1).max(1);
    let raw = state.tmdb.search(&query.q, page).await?;
    Ok(Json(MoviePage::normalize(
        &raw,
        &state.settings.tmdb_image_base_url,
    )))
}

/// Recommendations derived from a user's favorites
///
/// An empty favorite set short-circuits to the empty page without touching
/// upstream. Otherwise the seed is the user's smallest favorite movie id,
/// which keeps the derivation stable across process runs.
pub async fn user_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<MoviePage>> {
    let favorites = state.favorites.list(user_id);
    let Some(seed) = favorites.first().copied() else {
        return Ok(Json(MoviePage::empty()));
    };

    let raw = state.tmdb.recommendations(seed, query.page()).await?;
    Ok(Json(MoviePage::normalize(
        &raw,
        &state.settings.tmdb_image_base_url,
    )))
}

/// Recommendations for a specific movie
pub async fn movie_recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<MoviePage>> {
    let raw = state.tmdb.recommendations(movie_id, query.page()).await?;
    Ok(Json(MoviePage::normalize(
        &raw,
        &state.settings.tmdb_image_base_url,
    )))
}

/// Full details for one movie
pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> ApiResult<Json<Movie>> {
    let raw = state.tmdb.movie_detail(movie_id).await?;
    Ok(Json(Movie::normalize(
        &raw,
        &state.settings.tmdb_image_base_url,
    )))
}
