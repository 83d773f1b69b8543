//! Authentication routes
//!
//! Signup and login answer identity failures as `{success: false, message}`
//! payloads rather than HTTP errors; only token verification raises 401.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, LoginRequest, SignupRequest, UserView};
use crate::stores::{NewUser, SignupError};
use crate::validation::validate_email;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/verify", get(verify))
}

/// Register a new user and hand back a fresh session token
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<Json<AuthResponse>> {
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        birthday: payload.birthday,
    };

    match state.users.signup(new_user) {
        Ok(user) => {
            let token = issue_token(&state, user.id)?;
            Ok(Json(AuthResponse::granted(
                "User created",
                UserView::from(&user),
                token,
            )))
        }
        Err(SignupError::EmailTaken) => {
            Ok(Json(AuthResponse::denied("Email already registered")))
        }
    }
}

/// Check credentials and hand back a fresh session token
///
/// Unknown email and wrong password produce the identical response so the
/// caller cannot tell which one failed.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    info!("Login attempt for {}", payload.email);

    match state.users.login(&payload.email, &payload.password) {
        Some(user) => {
            let token = issue_token(&state, user.id)?;
            Ok(Json(AuthResponse::granted(
                "Login successful",
                UserView::from(&user),
                token,
            )))
        }
        None => Ok(Json(AuthResponse::denied("Invalid credentials"))),
    }
}

/// Stateless acknowledgement; tokens expire on their own
pub async fn logout() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Logged out"
    }))
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

/// Verify a session token's signature, expiry, and subject
pub async fn verify(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> ApiResult<Json<Value>> {
    let claims = state.tokens.verify(&query.token)?;

    // A token for a subject this process never issued an id for (e.g. a
    // token that survived a restart) is invalid, not expired.
    if !state.users.contains(claims.sub) {
        return Err(ApiError::TokenInvalid);
    }

    Ok(Json(json!({
        "success": true,
        "message": "Token valid"
    })))
}

fn issue_token(state: &AppState, user_id: u64) -> ApiResult<String> {
    state.tokens.issue(user_id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::Internal
    })
}
