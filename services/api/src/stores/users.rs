//! In-memory user store with a secondary email index

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use crate::models::User;

/// New user payload accepted by signup and demo seeding
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub birthday: Option<String>,
}

/// Signup failure, returned as data and answered with `success: false`
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignupError {
    #[error("Email already registered")]
    EmailTaken,
}

#[derive(Debug)]
struct UserTable {
    users: HashMap<u64, User>,
    email_index: HashMap<String, u64>,
    next_id: u64,
}

impl Default for UserTable {
    fn default() -> Self {
        UserTable {
            users: HashMap::new(),
            email_index: HashMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory user store
///
/// Every mutation takes the write lock for its whole critical section, so
/// id allocation, record insert, and email indexing happen atomically with
/// respect to concurrent signups.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<UserTable>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user
    ///
    /// Fails with [`SignupError::EmailTaken`] when the email is already
    /// indexed; the existing record is left untouched.
    pub fn signup(&self, new_user: NewUser) -> Result<User, SignupError> {
        let mut table = self.inner.write();
        if table.email_index.contains_key(&new_user.email) {
            return Err(SignupError::EmailTaken);
        }

        let user = insert_user(&mut table, new_user);
        info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Check credentials and return the matching user
    ///
    /// `None` covers both an unknown email and a wrong password; callers
    /// must answer both with the same message so neither case leaks.
    pub fn login(&self, email: &str, password: &str) -> Option<User> {
        let table = self.inner.read();
        let id = table.email_index.get(email)?;
        let user = table.users.get(id)?;

        if user.password_hash == hash_password(password) {
            Some(user.clone())
        } else {
            None
        }
    }

    /// Whether a user id resolves to a record
    pub fn contains(&self, id: u64) -> bool {
        self.inner.read().users.contains_key(&id)
    }

    /// Look up a user by id
    pub fn get(&self, id: u64) -> Option<User> {
        self.inner.read().users.get(&id).cloned()
    }

    /// Create the demo account if it does not exist yet
    ///
    /// Idempotent: an already-registered email returns the existing record
    /// unchanged. Called once at startup.
    pub fn seed_demo(&self, username: &str, email: &str, password: &str) -> User {
        let mut table = self.inner.write();
        if let Some(id) = table.email_index.get(email).copied() {
            if let Some(existing) = table.users.get(&id) {
                return existing.clone();
            }
        }

        let user = insert_user(
            &mut table,
            NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                birthday: None,
            },
        );
        info!("Seeded demo user {} ({})", user.id, user.username);
        user
    }
}

fn insert_user(table: &mut UserTable, new_user: NewUser) -> User {
    let id = table.next_id;
    table.next_id += 1;

    let user = User {
        id,
        username: new_user.username,
        email: new_user.email.clone(),
        password_hash: hash_password(&new_user.password),
        birthday: new_user.birthday,
        created_at: Utc::now(),
    };

    table.users.insert(id, user.clone());
    table.email_index.insert(new_user.email, id);
    user
}

/// Unsalted SHA-256 hex digest.
///
/// Kept deliberately compatible with the legacy hashes this service
/// inherits; swapping in a salted slow hash would invalidate existing
/// credentials and is tracked as a separate migration.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
