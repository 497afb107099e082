// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::tokens::TokenService;
use crate::services::RecipeStorage;

/// Application state containing the database pool, token service, and
/// object-storage client
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: TokenService,
    pub storage: Arc<RecipeStorage>,
}
