//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::X_CONTENT_TYPE_OPTIONS, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::models::AppConfig;
use crate::services::{PatternService, PatternStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<PatternService>,
    pub store: Arc<PatternStore>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<PatternService> {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

impl FromRef<AppState> for Arc<PatternStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let config = Arc::new(config);
    let service = Arc::new(PatternService::new(config.clone()));
    let store = Arc::new(PatternStore::new(config.store.capacity));

    AppState {
        config,
        service,
        store,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.limits.max_upload_bytes;

    Router::new()
        .route("/api/patterns", post(api::handle_create_pattern))
        .route("/api/patterns/image", post(api::handle_create_from_image))
        .route("/api/patterns/:id", get(api::handle_get_pattern))
        .route("/api/patterns/:id/grid.csv", get(api::handle_grid_csv))
        .route("/api/patterns/:id/legend.csv", get(api::handle_legend_csv))
        .route("/api/patterns/:id/preview.png", get(api::handle_preview))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}
