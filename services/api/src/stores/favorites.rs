//! In-memory favorites store

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;

/// Per-user favorite movie ids
///
/// All operations are idempotent and always succeed. The sets are ordered
/// (`BTreeSet`), so `list` returns ascending movie ids and the first element
/// is a stable recommendation seed across runs.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    inner: Arc<RwLock<BTreeMap<u64, BTreeSet<i64>>>>,
}

impl FavoritesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `movie_id` is a member of the user's set
    pub fn add(&self, user_id: u64, movie_id: i64) {
        self.inner.write().entry(user_id).or_default().insert(movie_id);
    }

    /// Ensure `movie_id` is absent from the user's set
    ///
    /// Removing a non-member (or from an unknown user) is a no-op.
    pub fn remove(&self, user_id: u64, movie_id: i64) {
        if let Some(set) = self.inner.write().get_mut(&user_id) {
            set.remove(&movie_id);
        }
    }

    /// Current members of the user's set, ascending by movie id
    ///
    /// An unknown user yields an empty vec, never an error.
    pub fn list(&self, user_id: u64) -> Vec<i64> {
        self.inner
            .read()
            .get(&user_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
