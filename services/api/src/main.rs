use std::sync::Arc;

use anyhow::Result;
use common::config::Settings;
use common::tmdb::TmdbClient;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::jwt::TokenService;
use api::routes;
use api::state::AppState;
use api::stores::{FavoritesStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting movies API service");

    let settings = Settings::from_env()?;

    // The TMDB client is built exactly once here and passed by handle;
    // every clone shares one connection pool.
    let tmdb = TmdbClient::from_settings(&settings)?;
    let tokens = TokenService::new(&settings.jwt_secret, settings.jwt_expires_seconds);
    let users = UserStore::new();
    let favorites = FavoritesStore::new();

    // Demo account for local frontends; idempotent and never aborts startup.
    let demo = users.seed_demo("demo", "demo@example.com", "secret");
    info!("Demo user ready (id {})", demo.id);

    let bind_addr = settings.bind_addr.clone();
    let state = AppState {
        settings: Arc::new(settings),
        tmdb,
        tokens,
        users,
        favorites,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Movies API listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
