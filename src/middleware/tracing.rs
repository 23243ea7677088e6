//! Request tracing middleware

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;

/// Middleware for logging request information with timing
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Client IP as reported by a reverse proxy, if any
    let client_ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    match outcome(status) {
        Outcome::ServerError => tracing::error!(
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed with error"
        ),
        Outcome::ClientError => tracing::warn!(
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed with client error"
        ),
        Outcome::Success => tracing::info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Success,
    ClientError,
    ServerError,
}

fn outcome(status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::ServerError
    } else if status.is_client_error() {
        Outcome::ClientError
    } else {
        Outcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        assert_eq!(outcome(StatusCode::OK), Outcome::Success);
        assert_eq!(outcome(StatusCode::SEE_OTHER), Outcome::Success);
        assert_eq!(outcome(StatusCode::NOT_ACCEPTABLE), Outcome::ClientError);
        assert_eq!(outcome(StatusCode::INTERNAL_SERVER_ERROR), Outcome::ServerError);
    }
}
