//! Movies API service
//!
//! Backend-for-frontend that proxies TMDB, adds a minimal token-based
//! authentication layer, and keeps per-user favorite lists in memory.
//! All state is single-process and volatile by design; restarting the
//! process empties the stores.

pub mod error;
pub mod jwt;
pub mod models;
pub mod routes;
pub mod state;
pub mod stores;
pub mod validation;

pub use state::AppState;
