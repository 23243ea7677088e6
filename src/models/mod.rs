//! Data models for AuthGate

pub mod credentials;
pub mod user;

pub use credentials::Credentials;
pub use user::{normalize_email, User};
