// src/recipes/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Recipe Models
// ============================================================================

/// Recipe database model. steps and ingredients are JSON arrays stored as
/// TEXT columns.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Recipe {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub description: String,
    pub steps: String,
    pub ingredients: String,
    pub cook_time_seconds: i64,
    pub cook_time: String,
    pub category: String,
    pub difficulty: String,
    pub image_url: String,
    pub created_at: Option<String>,
}

/// Recipe response with the JSON text columns parsed to arrays
#[derive(Serialize, Debug)]
pub struct RecipeResponse {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub ingredients: Vec<String>,
    pub cook_time_seconds: i64,
    pub cook_time: String,
    pub category: String,
    pub difficulty: String,
    pub image_url: String,
    pub created_at: Option<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        let steps = serde_json::from_str::<Vec<String>>(&recipe.steps).unwrap_or_default();
        let ingredients =
            serde_json::from_str::<Vec<String>>(&recipe.ingredients).unwrap_or_default();

        RecipeResponse {
            id: recipe.id,
            creator_id: recipe.creator_id,
            title: recipe.title,
            description: recipe.description,
            steps,
            ingredients,
            cook_time_seconds: recipe.cook_time_seconds,
            cook_time: recipe.cook_time,
            category: recipe.category,
            difficulty: recipe.difficulty,
            image_url: recipe.image_url,
            created_at: recipe.created_at,
        }
    }
}

/// Creator fields attached to a single-recipe lookup
#[derive(FromRow, Serialize, Debug)]
pub struct CreatorSummary {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Single-recipe lookup response. The creator may be gone when the account
/// was deleted after the recipe was published.
#[derive(Serialize, Debug)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub creator: Option<CreatorSummary>,
}

/// Text fields collected from the multipart create-recipe body
#[derive(Debug, Default)]
pub struct CreateRecipeFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub steps: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub cook_time: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

// ============================================================================
// Search Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRecipesParams {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    /// Whitespace-separated ingredient tokens; every token must be present
    pub ingredients: Option<String>,
    #[serde(rename = "minCookTime")]
    pub min_cook_time: Option<String>,
    #[serde(rename = "maxCookTime")]
    pub max_cook_time: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paginated search response
#[derive(Serialize, Debug)]
pub struct SearchResponse {
    pub current_page: i64,
    pub total_pages: i64,
    pub recipes: Vec<RecipeResponse>,
}
