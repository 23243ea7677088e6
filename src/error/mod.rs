//! Centralized API error handling for AuthGate
//!
//! Every handler failure ends up here as an `ApiError`, and this is the only
//! place where an error kind is turned into a status code and a response body.
//! The bodies mirror what browser forms and existing clients of the auth flow
//! expect: a JSON `{error}` for missing fields, bare strings for credential
//! failures and a JSON `{message}` for the session guard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Please input both fields!")]
    MissingFields,

    #[error("User already exists!")]
    UserAlreadyExists,

    #[error("User not found!")]
    UserNotFound,

    #[error("Invalid Password!")]
    InvalidPassword,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingFields => "MISSING_FIELDS",
            ApiError::UserAlreadyExists => "USER_EXISTS",
            ApiError::UserNotFound => "USER_NOT_FOUND",
            ApiError::InvalidPassword => "INVALID_PASSWORD",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields
            | ApiError::UserAlreadyExists
            | ApiError::UserNotFound
            | ApiError::InvalidPassword
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::NOT_ACCEPTABLE,
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        // Log server errors
        if self.is_server_error() {
            tracing::error!(error = %message, code = %error_code, "Server error occurred");
        } else {
            tracing::debug!(error = %message, code = %error_code, "Client error occurred");
        }

        match self {
            ApiError::UserAlreadyExists | ApiError::UserNotFound | ApiError::InvalidPassword => {
                (status, message).into_response()
            }
            ApiError::MissingFields => (status, Json(json!({ "error": message }))).into_response(),
            ApiError::BadRequest(detail) => {
                (status, Json(json!({ "error": detail }))).into_response()
            }
            ApiError::Unauthorized => {
                (status, Json(json!({ "message": "Unauthorized" }))).into_response()
            }
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                (status, Json(json!({ "error": "Internal server error" }))).into_response()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserAlreadyExists => ApiError::UserAlreadyExists,
            AuthError::UserNotFound => ApiError::UserNotFound,
            AuthError::InvalidPassword => ApiError::InvalidPassword,
            AuthError::Unauthorized(_) => ApiError::Unauthorized,
            AuthError::Store(e) => ApiError::DatabaseError(e.to_string()),
            AuthError::Password(e) => ApiError::InternalError(e.to_string()),
            AuthError::Token(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;
