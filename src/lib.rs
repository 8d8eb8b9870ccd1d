//! Karaoke Finder: rank nearby karaoke venues by distance or by the price of a stay.
//!
//! The engine has three parts:
//! - [`geo`]: great-circle distance and walking time
//! - [`pricing`]: tiered stay prices (interval vs. free-time, weekday/weekend,
//!   student/member discounts)
//! - [`ranking`]: the session coordinator that keeps prices current and orders venues

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod models;
pub mod pricing;
pub mod ranking;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::models::Venue;
use crate::pricing::responses::HealthResponse;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<[Venue]>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(catalog: Vec<Venue>, config: AppConfig) -> Self {
        Self {
            catalog: catalog.into(),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with its middleware stack.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        venues: state.catalog.len(),
    })
}
