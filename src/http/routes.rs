use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Path the dictation client posts audio to
pub const DICTATION_PATH: &str = "/NmspServlet/";

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Dictation bridge; uploads are streamed for as long as the client talks
        .route(DICTATION_PATH, post(handlers::dictation))
        .route("/NmspServlet/*rest", post(handlers::dictation))
        .layer(DefaultBodyLimit::disable())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
