//! Credential store
//!
//! One record per user, keyed by a unique email. The store is the authoritative
//! guard for email uniqueness: callers may pre-check with `find_by_email`, but
//! only `create` decides, and it reports a clash as `StoreError::DuplicateEmail`.

mod memory;
mod postgres;

use axum::async_trait;
use thiserror::Error;

use crate::models::User;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Persistence contract for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user, failing with `DuplicateEmail` if the email is taken
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Connectivity check
    async fn ping(&self) -> Result<(), StoreError>;
}
