//! Middleware for AuthGate
//!
//! This module provides middleware for request tracing, security headers,
//! and the session guard protecting authenticated pages.

pub mod session;
mod security;
mod tracing;

pub use security::{hsts_header, security_headers};
pub use session::{removal_cookie, session_cookie, SessionUser, SESSION_COOKIE};
pub use tracing::request_tracing;
