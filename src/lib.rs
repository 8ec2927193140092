//! SMS Shield
//!
//! Classifies inbound SMS messages and escalates risk when the contact
//! identifier shows up in a breach database.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SMS SHIELD                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  POST /predict (Axum)                                       │
//! │        │                                                    │
//! │        ▼                                                    │
//! │  ┌─────────────────────── RiskPipeline ──────────────────┐  │
//! │  │  SenderDirectory ─► SpamClassifier ─► BreachLookup    │  │
//! │  │   (static sets)      (TF-IDF model)    (HIBP, bounded)│  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod middleware;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use logic::RiskPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RiskPipeline>,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CatchPanicLayer::custom(middleware::panic::handle_panic))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
