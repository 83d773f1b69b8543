//! User model and auth request/response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity, owned exclusively by the user store
///
/// Records are created on signup or demo-seed and never mutated or deleted
/// for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub birthday: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public user projection; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub birthday: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        UserView {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            birthday: user.birthday.clone(),
        }
    }
}

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub birthday: Option<String>,
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response shape shared by signup and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: Option<UserView>,
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn granted(message: &str, user: UserView, token: String) -> Self {
        AuthResponse {
            success: true,
            message: message.to_string(),
            user: Some(user),
            token: Some(token),
        }
    }

    pub fn denied(message: &str) -> Self {
        AuthResponse {
            success: false,
            message: message.to_string(),
            user: None,
            token: None,
        }
    }
}
