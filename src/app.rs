//! Router assembly
//!
//! Kept out of `main` so integration tests drive exactly the router the
//! server runs.

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::middleware;
use crate::routes;
use crate::state::AppState;

/// HTTP-level options derived from configuration
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub cors_allowed_origins: Option<String>,
    pub enable_hsts: bool,
}

impl From<&Config> for HttpOptions {
    fn from(config: &Config) -> Self {
        Self {
            cors_allowed_origins: config.cors_allowed_origins.clone(),
            enable_hsts: config.environment.is_production(),
        }
    }
}

/// Build the application router with all middleware applied
pub fn build_router(state: AppState, options: &HttpOptions) -> Router {
    let router = Router::new()
        .merge(routes::page_routes())
        .merge(routes::auth_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers));

    let router = if options.enable_hsts {
        router.layer(axum::middleware::from_fn(middleware::hsts_header))
    } else {
        router
    };

    router
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(options.cors_allowed_origins.as_deref()))
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    // Credentialed CORS cannot use wildcard headers, so list what the forms send.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}
