//! Session guard
//!
//! Protected handlers take a `SessionUser` argument. Extraction reads the
//! `jwt` cookie, verifies it as a refresh token and mints a fresh access token.
//! Anything short of a valid refresh token is rejected with 406 before the
//! handler runs. Nothing is cached; every request is verified from scratch.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::auth::{AuthError, AuthService, Claims};
use crate::error::ApiError;

/// Name of the cookie carrying the refresh token
pub const SESSION_COOKIE: &str = "jwt";

/// Authenticated user extracted from the refresh cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub email: String,
    pub claims: Claims,
    /// Access token minted for this request. Not sent to the client.
    pub access_token: String,
}

/// Build the refresh-token cookie set at login
pub fn session_cookie(refresh_token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, refresh_token))
        .http_only(true)
        .same_site(SameSite::None)
        .secure(true)
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

/// Build a cookie that makes the browser drop the session cookie
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::None)
        .secure(true)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            tracing::debug!(path = %parts.uri.path(), "No session cookie");
            return Err(ApiError::Unauthorized);
        };

        let auth_service = Arc::<AuthService>::from_ref(state);

        let session = auth_service.authorize(cookie.value()).map_err(|e| {
            if let AuthError::Unauthorized(reason) = &e {
                tracing::debug!(path = %parts.uri.path(), reason = %reason, "Session cookie rejected");
            }
            ApiError::from(e)
        })?;

        Ok(SessionUser {
            user_id: session.user_id,
            email: session.claims.email.clone(),
            claims: session.claims,
            access_token: session.access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token-value".to_string(), 86_400).to_string();

        assert!(cookie.starts_with("jwt=token-value"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=None"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }
}
