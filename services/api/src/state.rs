//! Application state shared across handlers

use std::sync::Arc;

use common::config::Settings;
use common::tmdb::TmdbClient;

use crate::jwt::TokenService;
use crate::stores::{FavoritesStore, UserStore};

/// Application state shared across handlers
///
/// Everything here is a cheap handle: the stores and the TMDB client are
/// constructed once in `main` and cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub tmdb: TmdbClient,
    pub tokens: TokenService,
    pub users: UserStore,
    pub favorites: FavoritesStore,
}
