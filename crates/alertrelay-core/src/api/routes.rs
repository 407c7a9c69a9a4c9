//! API routes

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Create the ingress router.
///
/// Every method and path lands on the webhook handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::receive)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}
