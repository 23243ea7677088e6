//! Route definitions for AuthGate

mod auth;
mod pages;

pub use auth::auth_routes;
pub use pages::page_routes;
