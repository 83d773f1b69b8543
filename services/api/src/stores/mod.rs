//! In-memory stores for users and favorites
//!
//! Both stores are explicitly constructed in `main` and injected through
//! `AppState`, so tests get a fresh store per case and a future persistent
//! backend can slot in behind the same interface. State is volatile by
//! design: a restart empties everything.

pub mod favorites;
pub mod users;

pub use favorites::FavoritesStore;
pub use users::{NewUser, SignupError, UserStore};
