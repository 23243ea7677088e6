//! HTTP handlers for AuthGate

pub mod auth;
pub mod health;
pub mod pages;

pub use auth::{login, logout, signup};
pub use health::health_check;
pub use pages::{home, login_page, secret, signup_page};

// Re-export SessionUser from middleware for handler use
pub use crate::middleware::SessionUser;
