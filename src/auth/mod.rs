//! Authentication module for AuthGate
//!
//! Provides email/password authentication.
//! - bcrypt password hashing
//! - Access and refresh JWTs signed with separate secrets
//! - Stateless sessions: the refresh token in the `jwt` cookie is the session

mod jwt;
mod password;
mod service;

pub use jwt::{Claims, JwtError, TokenIssuer, TokenSubject};
pub use password::{PasswordError, PasswordHasher, DEFAULT_BCRYPT_COST};
pub use service::{AuthError, AuthService, IssuedTokens, Session};
