//! Favorites routes
//!
//! Add and remove are idempotent and always succeed. The detail listing
//! fetches every favorite from upstream and skips individual failures
//! (a favorite deleted upstream must not break the rest of the list).

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::models::Movie;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies/add", post(add_favorite))
        .route("/movies/remove", post(remove_favorite))
        .route("/:user_id/movies", get(user_favorites))
}

#[derive(Debug, Deserialize)]
pub struct FavoriteAction {
    pub user_id: u64,
    pub movie_id: i64,
}

/// Favorite listing with full movie metadata
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub success: bool,
    pub results: Vec<Movie>,
}

/// Add a movie to a user's favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(action): Json<FavoriteAction>,
) -> Json<Value> {
    state.favorites.add(action.user_id, action.movie_id);
    Json(json!({
        "success": true,
        "message": "Movie added to favorites"
    }))
}

/// Remove a movie from a user's favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Json(action): Json<FavoriteAction>,
) -> Json<Value> {
    state.favorites.remove(action.user_id, action.movie_id);
    Json(json!({
        "success": true,
        "message": "Movie removed from favorites"
    }))
}

/// List a user's favorites with full metadata
///
/// Per-item upstream failures are logged and excluded; partial results are
/// still a success, never a whole-operation failure.
pub async fn user_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Json<FavoritesResponse> {
    let mut results = Vec::new();

    for movie_id in state.favorites.list(user_id) {
        match state.tmdb.movie_detail(movie_id).await {
            Ok(raw) => results.push(Movie::normalize(
                &raw,
                &state.settings.tmdb_image_base_url,
            )),
            Err(err) => {
                warn!("Skipping favorite {} for user {}: {}", movie_id, user_id, err);
            }
        }
    }

    Json(FavoritesResponse {
        success: true,
        results,
    })
}
