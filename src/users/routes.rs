// src/users/routes.rs

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers;

/// Create the users router
///
/// # Routes
/// - `GET /api/user/profile/:name` - Public profile lookup
/// - `GET /api/user/profile` - Own profile (authenticated)
/// - `PUT /api/user/profile` - Partial profile update (authenticated)
/// - `PUT /api/user/password` - Change password (authenticated)
/// - `DELETE /api/user/account` - Delete account (authenticated)
pub fn users_routes() -> Router {
    Router::new()
        .route(
            "/api/user/profile",
            get(handlers::get_own_profile).put(handlers::update_profile),
        )
        .route("/api/user/profile/:name", get(handlers::get_profile_by_name))
        .route("/api/user/password", put(handlers::change_password))
        .route("/api/user/account", delete(handlers::delete_account))
}
