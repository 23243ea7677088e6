//! Page routes

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Create page routes, including the guarded /secret page and /health
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/signup", get(handlers::signup_page))
        .route("/login", get(handlers::login_page))
        .route("/secret", get(handlers::secret))
        .route("/health", get(handlers::health_check))
}
