pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vowel_core::{GameSettings, StageTable, VowelCatalog};

use crate::config::ServerConfig;
use crate::services::sessions::{spawn_idle_sweep, SessionStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        catalog: VowelCatalog,
        stages: StageTable,
        settings: GameSettings,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(catalog, stages, settings, rng_seed)),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Content routes
        .route("/api/introduction", get(routes::content::introduction))
        .route("/api/levels", get(routes::content::levels))
        // Session routes
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::snapshot).delete(routes::sessions::discard),
        )
        .route("/api/sessions/:id/start", post(routes::sessions::start))
        .route("/api/sessions/:id/select", post(routes::sessions::select))
        .route("/api/sessions/:id/replay", post(routes::sessions::replay))
        .route("/api/sessions/:id/proceed", post(routes::sessions::proceed))
        .route("/api/sessions/:id/menu", post(routes::sessions::menu))
        .route("/api/sessions/:id/events", get(routes::sessions::events))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let catalog = config.load_catalog()?;
    let stages = StageTable::builtin();
    tracing::info!("Validating {} vowels against sub-level tables...", catalog.len());
    stages.validate(&catalog)?;

    let store = SessionStore::new(catalog, stages, config.settings.clone(), config.rng_seed)
        .with_idle_timeout(config.session_idle_timeout);
    let state = AppState {
        sessions: Arc::new(store),
    };
    spawn_idle_sweep(Arc::clone(&state.sessions));
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
