//! Authentication HTTP handlers
//!
//! Form-driven endpoints for signup, login and logout. Successful calls
//! redirect like a browser flow expects; failures are `ApiError`s.

use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ApiResult;
use crate::middleware::{removal_cookie, session_cookie};
use crate::models::Credentials;
use crate::state::AppState;

/// POST /signup - Register a new user and send them to the login page
pub async fn signup(
    State(state): State<AppState>,
    credentials: Credentials,
) -> ApiResult<Redirect> {
    let (email, password) = credentials.into_parts()?;

    state.auth_service.signup(&email, &password).await?;

    Ok(Redirect::to("/login"))
}

/// POST /login - Check credentials, set the refresh cookie and go to /secret
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    credentials: Credentials,
) -> ApiResult<(CookieJar, Redirect)> {
    let (email, password) = credentials.into_parts()?;

    let tokens = state.auth_service.login(&email, &password).await?;

    // The access token is only ever used server-side; the browser keeps the
    // refresh token and presents it on every protected request.
    let cookie = session_cookie(
        tokens.refresh_token,
        state.auth_service.tokens().refresh_ttl_seconds(),
    );

    Ok((jar.add(cookie), Redirect::to("/secret")))
}

/// GET /logout - Drop the session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    tracing::info!("User logged out");
    (jar.add(removal_cookie()), Redirect::to("/login"))
}
