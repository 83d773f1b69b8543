//! Integration tests driving the full router with a wiremock TMDB stand-in

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use api::jwt::TokenService;
use api::routes::create_router;
use api::state::AppState;
use api::stores::{FavoritesStore, UserStore};
use common::config::Settings;
use common::tmdb::TmdbClient;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn test_state(upstream_url: &str) -> AppState {
    let settings = Settings {
        tmdb_api_key: "test-key".to_string(),
        tmdb_base_url: upstream_url.to_string(),
        tmdb_image_base_url: IMAGE_BASE.to_string(),
        tmdb_timeout_seconds: 2,
        frontend_origins: vec!["http://localhost:3000".to_string()],
        jwt_secret: "test-secret".to_string(),
        jwt_expires_seconds: 3600,
        bind_addr: "127.0.0.1:0".to_string(),
    };

    let tmdb = TmdbClient::from_settings(&settings).expect("client builds");

    AppState {
        settings: Arc::new(settings),
        tmdb,
        tokens: TokenService::new("test-secret", 3600),
        users: UserStore::new(),
        favorites: FavoritesStore::new(),
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    into_json(response).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    into_json(response).await
}

async fn into_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_endpoint_answers() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn signup_issues_a_token_that_verifies() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = post(
        &app,
        "/api/auth/signup",
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "hunter2",
            "birthday": "1990-01-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created");
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["birthday"], "1990-01-01");
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().expect("token present");
    let (status, body) = get(&app, &format!("/api/auth/verify?token={token}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Token valid");
}

#[tokio::test]
async fn duplicate_signup_is_denied_as_data() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let payload = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "hunter2"
    });

    let (status, first) = post(&app, "/api/auth/signup", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);

    let (status, second) = post(&app, "/api/auth/signup", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], false);
    assert_eq!(second["message"], "Email already registered");
    assert_eq!(second["token"], Value::Null);
}

#[tokio::test]
async fn signup_rejects_malformed_email() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = post(
        &app,
        "/api/auth/signup",
        json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "hunter2"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    post(
        &app,
        "/api/auth/signup",
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "hunter2"
        }),
    )
    .await;

    let (status_a, wrong_password) = post(
        &app,
        "/api/auth/login",
        json!({"email": "alice@example.com", "password": "wrong"}),
    )
    .await;
    let (status_b, unknown_email) = post(
        &app,
        "/api/auth/login",
        json!({"email": "nobody@example.com", "password": "hunter2"}),
    )
    .await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["message"], "Invalid credentials");

    let (status, body) = post(
        &app,
        "/api/auth/login",
        json!({"email": "alice@example.com", "password": "hunter2"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn logout_is_a_stateless_acknowledgement() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = post(&app, "/api/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logged out");
}

#[tokio::test]
async fn token_failures_are_distinct_401s() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = get(&app, "/api/auth/verify?token=garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    // Expired: same secret, exp in the past.
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &api::jwt::Claims {
            sub: 1,
            exp: now - 120,
        },
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    let (status, body) = get(&app, &format!("/api/auth/verify?token={expired}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");

    // Well-formed token for a subject this process never created.
    let orphan = TokenService::new("test-secret", 3600).issue(999).unwrap();
    let (status, body) = get(&app, &format!("/api/auth/verify?token={orphan}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn popular_page_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "poster_path": "/matrix.jpg"},
                {"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17"}
            ],
            "total_pages": 40,
            "total_results": 791
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server.uri()));
    // page=0 is floored to 1.
    let (status, body) = get(&app, "/api/movies/popular?page=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_results"], 791);
    assert_eq!(
        body["results"][0]["poster_url"],
        format!("{IMAGE_BASE}/matrix.jpg")
    );
    assert_eq!(body["results"][1]["title"], "Game of Thrones");
    assert_eq!(body["results"][1]["release_date"], "2011-04-17");
    assert_eq!(body["results"][1]["poster_url"], Value::Null);
}

#[tokio::test]
async fn search_requires_a_query() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = get(&app, "/api/movies/search?q=&page=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "q must not be empty");
}

#[tokio::test]
async fn upstream_404_passes_through_on_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/999999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&server)
        .await;

    let app = create_router(test_state(&server.uri()));
    let (status, body) = get(&app, "/api/movies/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "TMDB error: The resource you requested could not be found."
    );
}

#[tokio::test]
async fn favorites_listing_skips_items_missing_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10,
            "title": "Star Wars",
            "poster_path": "/sw.jpg",
            "release_date": "1977-05-25",
            "vote_average": 8.2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&server)
        .await;

    let app = create_router(test_state(&server.uri()));

    // Adding twice is idempotent.
    for _ in 0..2 {
        let (status, body) = post(
            &app,
            "/api/preferences/movies/add",
            json!({"user_id": 1, "movie_id": 10}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Movie added to favorites");
    }
    post(
        &app,
        "/api/preferences/movies/add",
        json!({"user_id": 1, "movie_id": 99}),
    )
    .await;

    let (status, body) = get(&app, "/api/preferences/1/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1, "missing favorite must be skipped");
    assert_eq!(results[0]["id"], 10);
    assert_eq!(results[0]["poster_url"], format!("{IMAGE_BASE}/sw.jpg"));
}

#[tokio::test]
async fn remove_favorite_is_a_no_op_for_non_members() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = post(
        &app,
        "/api/preferences/movies/remove",
        json!({"user_id": 7, "movie_id": 42}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Movie removed from favorites");

    let (_, listing) = get(&app, "/api/preferences/7/movies").await;
    assert_eq!(listing["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn empty_favorites_recommendations_skip_upstream() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server.uri()));

    let (status, body) = get(&app, "/api/movies/user/1/recommendations?page=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"page": 1, "results": [], "total_pages": 0, "total_results": 0})
    );

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no upstream call may happen");
}

#[tokio::test]
async fn user_recommendations_seed_from_smallest_favorite() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/13/recommendations"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "results": [{"id": 14, "title": "Forrest Gump"}],
            "total_pages": 3,
            "total_results": 41
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server.uri()));

    // Insert out of order; the smallest id is the seed.
    post(
        &app,
        "/api/preferences/movies/add",
        json!({"user_id": 1, "movie_id": 550}),
    )
    .await;
    post(
        &app,
        "/api/preferences/movies/add",
        json!({"user_id": 1, "movie_id": 13}),
    )
    .await;

    let (status, body) = get(&app, "/api/movies/user/1/recommendations?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["results"][0]["title"], "Forrest Gump");
}
