//! Event Bulletin Server
//!
//! A small HTTP service for posting, listing and removing bulletin events,
//! including emergency (SOS) alerts, stored in a single SQLite table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Build the HTTP router with CORS open to any origin
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::events::list).post(handlers::events::create),
        )
        .route("/events/:id", delete(handlers::events::remove))
        .route("/sos", post(handlers::sos::create))
}
