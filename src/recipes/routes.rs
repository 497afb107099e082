// src/recipes/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the recipes router
///
/// # Routes
/// - `GET /api/recipes/search` - Filtered, paginated catalog search
/// - `GET /api/recipes/:id` - Fetch one recipe
/// - `POST /api/recipes` - Create a recipe (authenticated, multipart)
/// - `DELETE /api/recipes/:id` - Delete an owned recipe (authenticated)
pub fn recipes_routes() -> Router {
    Router::new()
        // NOTE: the search route must stay distinct from the :id route
        .route("/api/recipes/search", get(handlers::search_recipes))
        .route(
            "/api/recipes/:id",
            get(handlers::get_recipe_by_id).delete(handlers::delete_recipe),
        )
        .route("/api/recipes", post(handlers::create_recipe))
}
