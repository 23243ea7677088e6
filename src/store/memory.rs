//! In-process credential store
//!
//! Used by tests and local runs without PostgreSQL. Uniqueness is checked and
//! the record inserted under one lock, so concurrent creates for the same
//! email cannot both succeed.

use std::collections::HashMap;
use std::sync::Arc;

use axum::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::User;

/// HashMap-backed user store keyed by email
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(email.to_string(), user.clone());

        Ok(user)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryUserStore::new();
        let created = store.create("a@x.com", "hash").await.unwrap();

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let store = MemoryUserStore::new();
        store.create("a@x.com", "hash").await.unwrap();

        assert!(store.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_and_original_kept() {
        let store = MemoryUserStore::new();
        let original = store.create("a@x.com", "first").await.unwrap();

        let err = store.create("a@x.com", "second").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));

        let stored = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "first");
        assert_eq!(stored.id, original.id);
    }

    #[tokio::test]
    async fn test_concurrent_creates_single_winner() {
        let store = MemoryUserStore::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create("race@x.com", &format!("h{}", i)).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
