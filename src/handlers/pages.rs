//! Page handlers

use axum::response::Html;

use super::SessionUser;
use crate::views;

/// GET / - Landing page
pub async fn home() -> Html<String> {
    views::home()
}

/// GET /signup - Signup form
pub async fn signup_page() -> Html<String> {
    views::signup()
}

/// GET /login - Login form
pub async fn login_page() -> Html<String> {
    views::login()
}

/// GET /secret - Protected page, only reachable with a valid session cookie
pub async fn secret(user: SessionUser) -> Html<String> {
    tracing::debug!(user_id = %user.user_id, "Serving protected page");
    views::secret(&user.email)
}
