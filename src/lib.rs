//! ThreatLens Backend
//!
//! Backend for the ThreatLens threat-intelligence dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   THREATLENS BACKEND                    │
//! ├─────────────────────────────────────────────────────────┤
//! │  ┌───────────────┐          ┌─────────────────────────┐ │
//! │  │  API Server   │          │  Ingestion Command      │ │
//! │  │  (Axum)       │          │  (CSV / sample seeder)  │ │
//! │  └───────┬───────┘          └────────────┬────────────┘ │
//! │          └──────────────┬────────────────┘              │
//! │                         ▼                               │
//! │                  ┌─────────────┐                        │
//! │                  │    MySQL    │                        │
//! │                  └─────────────┘                        │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod models;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::MySqlPool,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/threats", get(handlers::threats::list))
        .route("/api/threats/:id", get(handlers::threats::get))
        .route("/api/dashboard/stats", get(handlers::stats::dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
