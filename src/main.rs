//! Quiz Practice Backend
//!
//! A REST backend with SQLite persistence, quiz CRUD, and a session-scoped
//! random-play game mode.

mod api;
mod config;
mod db;
mod errors;
mod game;
mod models;
mod session;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use game::{RandomSource, ThreadRandom};
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub sessions: Arc<SessionStore>,
    pub rng: Arc<dyn RandomSource>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Quiz Practice Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Create application state
    let state = AppState {
        repo,
        sessions: Arc::new(SessionStore::new()),
        rng: Arc::new(ThreadRandom),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Listing and creation
        .route("/quizzes", get(api::list_quizzes))
        .route("/quizzes", post(api::create_quiz))
        .route("/quizzes/new", get(api::new_quiz))
        // Random play
        .route("/quizzes/randomplay", get(api::random_play))
        // Single quiz
        .route("/quizzes/{id}", get(api::get_quiz))
        .route("/quizzes/{id}", put(api::update_quiz))
        .route("/quizzes/{id}", delete(api::delete_quiz))
        .route("/quizzes/{id}/edit", get(api::edit_quiz))
        .route("/quizzes/{id}/play", get(api::play_quiz))
        .route("/quizzes/{id}/check", get(api::check_quiz))
        .route("/quizzes/{id}/randomcheck", get(api::random_check))
        // Health check
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
