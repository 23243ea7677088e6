//! Password hashing
//!
//! Thin wrapper over bcrypt. The salt is random per hash and embedded in the
//! output together with the cost, so verification needs nothing but the hash.

use thiserror::Error;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Salted one-way password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError::HashFailed(e.to_string()))
    }

    /// Constant-time comparison is done inside bcrypt
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(plaintext, hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("pw").unwrap();

        assert_ne!(hash, "pw");
        assert!(hasher.verify("pw", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = PasswordHasher::new(4);
        assert_ne!(hasher.hash("pw").unwrap(), hasher.hash("pw").unwrap());
    }

    #[test]
    fn test_cost_embedded_in_hash() {
        let hash = PasswordHasher::new(5).hash("pw").unwrap();
        assert!(hash.starts_with("$2b$05$"));
        assert_eq!(PasswordHasher::default().cost, 10);
    }

    #[test]
    fn test_malformed_hash() {
        let result = PasswordHasher::new(4).verify("pw", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
