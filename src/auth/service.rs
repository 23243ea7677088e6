//! Authentication service
//!
//! Core business logic for password authentication: registering users,
//! checking credentials and turning a refresh cookie back into a session.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{normalize_email, User};
use crate::store::{StoreError, UserStore};

use super::jwt::{Claims, JwtError, TokenIssuer, TokenSubject};
use super::password::{PasswordError, PasswordHasher};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Unauthorized: {0}")]
    Unauthorized(JwtError),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(JwtError),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail(_) => AuthError::UserAlreadyExists,
            other => AuthError::Store(other),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Token(e)
    }
}

/// Tokens produced by a successful login
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// A verified refresh token plus the access token minted for this request
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub claims: Claims,
    pub access_token: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new user
    ///
    /// The existence check is only for a clean error; the store's uniqueness
    /// constraint is what actually prevents two records for one email.
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self.store.create(&email, &password_hash).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }

    /// Check credentials and issue an access/refresh token pair
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedTokens, AuthError> {
        let email = normalize_email(email);

        let user = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidPassword);
        }

        let subject = TokenSubject::from(&user);
        let tokens = IssuedTokens {
            access_token: self.tokens.issue_access_token(&subject)?,
            refresh_token: self.tokens.issue_refresh_token(&subject)?,
        };

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(tokens)
    }

    /// Verify a refresh token and mint a fresh access token for it
    pub fn authorize(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let claims = self
            .tokens
            .verify_refresh_token(refresh_token)
            .map_err(AuthError::Unauthorized)?;
        let user_id = claims.user_id().map_err(AuthError::Unauthorized)?;

        let access_token = self.tokens.issue_access_token(&TokenSubject::from(&claims))?;
        tracing::debug!(user_id = %user_id, "Minted access token for session");

        Ok(Session {
            user_id,
            claims,
            access_token,
        })
    }

    /// Check that the credential store is reachable
    pub async fn check_store(&self) -> Result<(), AuthError> {
        self.store.ping().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryUserStore;

    fn service() -> (AuthService, MemoryUserStore) {
        let store = MemoryUserStore::new();
        let service = AuthService::new(
            Arc::new(store.clone()),
            PasswordHasher::new(4),
            TokenIssuer::new("access-secret", "refresh-secret", 15, 86_400),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_signup_stores_lowercased_email_and_hash() {
        let (service, store) = service();

        let user = service.signup("A@x.com", "pw").await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_ne!(user.password_hash, "pw");
        assert!(user.password_hash.starts_with("$2b$"));

        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_signup_duplicate_rejected_in_any_case() {
        let (service, store) = service();
        service.signup("a@x.com", "pw").await.unwrap();

        assert!(matches!(
            service.signup("a@x.com", "other").await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert!(matches!(
            service.signup("A@X.COM", "other").await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_duplicate_maps_to_user_exists() {
        // Simulates losing the race: the record appears between check and insert.
        let err = AuthError::from(StoreError::DuplicateEmail("a@x.com".to_string()));
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_login_success_issues_both_tokens() {
        let (service, _) = service();
        let user = service.signup("a@x.com", "pw").await.unwrap();

        let tokens = service.login("A@x.com", "pw").await.unwrap();

        let access = service.tokens().verify_access_token(&tokens.access_token).unwrap();
        let refresh = service.tokens().verify_refresh_token(&tokens.refresh_token).unwrap();
        assert_eq!(access.sub, user.id.to_string());
        assert_eq!(refresh.sub, user.id.to_string());
        assert_eq!(refresh.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (service, _) = service();
        assert!(matches!(
            service.login("nobody@x.com", "pw").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _) = service();
        service.signup("a@x.com", "pw").await.unwrap();

        assert!(matches!(
            service.login("a@x.com", "nope").await,
            Err(AuthError::InvalidPassword)
        ));
    }

    #[tokio::test]
    async fn test_authorize_valid_refresh_token() {
        let (service, _) = service();
        service.signup("a@x.com", "pw").await.unwrap();
        let tokens = service.login("a@x.com", "pw").await.unwrap();

        let session = service.authorize(&tokens.refresh_token).unwrap();
        assert_eq!(session.claims.email, "a@x.com");
        assert_eq!(session.user_id.to_string(), session.claims.sub);

        let fresh = service.tokens().verify_access_token(&session.access_token).unwrap();
        assert_eq!(fresh.sub, session.claims.sub);
    }

    #[tokio::test]
    async fn test_authorize_rejects_access_token_and_garbage() {
        let (service, _) = service();
        service.signup("a@x.com", "pw").await.unwrap();
        let tokens = service.login("a@x.com", "pw").await.unwrap();

        assert!(matches!(
            service.authorize(&tokens.access_token),
            Err(AuthError::Unauthorized(_))
        ));
        assert!(matches!(
            service.authorize("garbage"),
            Err(AuthError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_authorize_rejects_non_uuid_subject() {
        let (service, _) = service();
        let token = service
            .tokens()
            .issue_refresh_token(&TokenSubject {
                user_id: "not-a-uuid".to_string(),
                email: "a@x.com".to_string(),
            })
            .unwrap();

        assert!(matches!(
            service.authorize(&token),
            Err(AuthError::Unauthorized(JwtError::InvalidToken(_)))
        ));
    }
}
