//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::SessionService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionService>,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Arc<SessionService> {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let session = SessionService::new(&config);
    AppState {
        session,
        config: Arc::new(config),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/source", post(api::handle_upload_source))
        .route(
            "/api/transform",
            get(api::handle_get_transform).post(api::handle_transform_event),
        )
        .route(
            "/api/settings",
            get(api::handle_get_settings).put(api::handle_update_settings),
        )
        .route("/api/preview.png", get(api::handle_preview))
        .route("/api/export.png", get(api::handle_export))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
