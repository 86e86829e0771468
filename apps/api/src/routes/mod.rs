pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/skills/extract",
            post(handlers::handle_extract_skills),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        // Cover letter API
        .route("/api/v1/cover-letters", post(handlers::handle_generate))
        .route(
            "/api/v1/cover-letters/export",
            post(handlers::handle_export),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
