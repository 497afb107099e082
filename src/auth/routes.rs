//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/register` - Create an account and open a session
/// - `POST /api/auth/login` - Verify credentials and open a session
/// - `GET /api/auth/logout` - Drop the session cookie
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", get(handlers::logout))
}
