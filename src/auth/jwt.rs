//! JWT token generation and validation
//!
//! Handles creation and verification of access and refresh tokens. Each kind
//! is signed with its own secret, so a leaked access secret cannot be used to
//! mint refresh tokens and vice versa.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Token type (access or refresh)
    pub token_type: String,
}

impl Claims {
    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Identity carried inside every token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: String,
    pub email: String,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
        }
    }
}

impl From<&Claims> for TokenSubject {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
        }
    }
}

/// Signing keys plus lifetimes for both token kinds
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    #[cfg(test)]
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenIssuer {
    /// Create a new issuer
    ///
    /// # Arguments
    /// * `access_secret` - HMAC secret for access tokens
    /// * `refresh_secret` - HMAC secret for refresh tokens
    /// * `access_ttl_seconds` - Access token time-to-live in seconds
    /// * `refresh_ttl_seconds` - Refresh token time-to-live in seconds
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl_seconds: i64,
        refresh_ttl_seconds: i64,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            #[cfg(test)]
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }

    /// Generate an access token
    pub fn issue_access_token(&self, subject: &TokenSubject) -> Result<String, JwtError> {
        generate_token(
            subject,
            &self.access_encoding,
            self.access_ttl_seconds,
            TokenType::Access,
        )
    }

    /// Generate a refresh token
    pub fn issue_refresh_token(&self, subject: &TokenSubject) -> Result<String, JwtError> {
        generate_token(
            subject,
            &self.refresh_encoding,
            self.refresh_ttl_seconds,
            TokenType::Refresh,
        )
    }

    /// Verify an access token against the access secret
    ///
    /// Access tokens are only ever minted here; nothing in the server reads
    /// them back, so verification exists for checking what was issued.
    #[cfg(test)]
    pub(crate) fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        verify_token(token, &self.access_decoding, TokenType::Access)
    }

    /// Verify a refresh token against the refresh secret
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        verify_token(token, &self.refresh_decoding, TokenType::Refresh)
    }
}

/// Internal function to generate tokens
fn generate_token(
    subject: &TokenSubject,
    key: &EncodingKey,
    ttl_seconds: i64,
    token_type: TokenType,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        sub: subject.user_id.clone(),
        email: subject.email.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
        token_type: token_type.as_str().to_string(),
    };

    encode(&Header::default(), &claims, key).map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify and decode a JWT token
///
/// # Returns
/// * `Ok(Claims)` if the signature, expiry and token type all check out
/// * `Err(JwtError)` otherwise
fn verify_token(token: &str, key: &DecodingKey, expected: TokenType) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // Expiry is exact: a 15 second token must not live for 75.
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken(e.to_string()),
    })?;

    if token_data.claims.token_type != expected.as_str() {
        return Err(JwtError::InvalidToken(format!(
            "expected {} token",
            expected.as_str()
        )));
    }

    Ok(token_data.claims)
}
