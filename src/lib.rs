//! AuthGate Library
//!
//! Email/password authentication with stateless JWT sessions: signup, login,
//! a refresh-token cookie, a guarded page and logout.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;
