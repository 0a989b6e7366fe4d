//! MentorHub Backend
//!
//! REST backend for the student-project mentoring platform, with SQLite persistence.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{ContactRepository, FileRepository, ProjectRepository, ReviewRepository, UserRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub projects: ProjectRepository,
    pub reviews: ReviewRepository,
    pub contacts: ContactRepository,
    pub files: FileRepository,
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

    tracing::info!("Starting MentorHub Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;

    // Create application state
    let state = AppState {
        users: UserRepository::new(pool.clone()),
        projects: ProjectRepository::new(pool.clone()),
        reviews: ReviewRepository::new(pool.clone()),
        contacts: ContactRepository::new(pool.clone()),
        files: FileRepository::new(pool),
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

    // Allow for multipart framing overhead on top of the raw file cap
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    // API routes
    let api_routes = Router::new()
        // Accounts
        .route("/signup", post(api::signup))
        .route("/login", post(api::login))
        // Directories
        .route("/mentors", get(api::list_mentors))
        .route("/mentees", get(api::list_mentees))
        // Projects
        .route("/projects", get(api::list_projects))
        .route("/projects", post(api::create_project))
        .route("/projects/{id}", get(api::get_project))
        .route("/projects/{id}/detail", get(api::get_project))
        .route("/mentor-projects", get(api::mentor_projects))
        .route("/hod/project-details", get(api::hod_project_details))
        // Reviews
        .route("/projects/{id}/reviews", get(api::list_reviews))
        .route("/projects/{id}/reviews", post(api::create_review))
        // Contact form
        .route("/contacts", post(api::create_contact))
        .route("/contacts", get(api::list_contacts))
        // Artifacts
        .route("/files", post(api::upload_file))
        .route("/files", get(api::list_files))
        .route("/files/{id}/download", get(api::download_file))
        .route("/projects/{id}/files", get(api::list_project_files))
        .layer(DefaultBodyLimit::max(body_limit));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
