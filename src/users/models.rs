// src/users/models.rs

use serde::{Deserialize, Serialize};

use crate::recipes::models::Recipe;

/// Generic message-only response body
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Recipe fields included in profile listings
#[derive(Serialize, Debug)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub category: String,
    pub ingredients: Vec<String>,
    pub image_url: String,
    pub cook_time: String,
    pub cook_time_seconds: i64,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        let ingredients =
            serde_json::from_str::<Vec<String>>(&recipe.ingredients).unwrap_or_default();

        RecipeSummary {
            id: recipe.id,
            title: recipe.title,
            difficulty: recipe.difficulty,
            category: recipe.category,
            ingredients,
            image_url: recipe.image_url,
            cook_time: recipe.cook_time,
            cook_time_seconds: recipe.cook_time_seconds,
        }
    }
}

/// Public profile projection with the user's recipes
#[derive(Serialize, Debug)]
pub struct PublicProfile {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: Option<String>,
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateProfileRequest {
    #[serde(rename = "newName")]
    pub new_name: Option<String>,
    #[serde(rename = "newAvatarUrl")]
    pub new_avatar_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Deserialize, Debug)]
pub struct DeleteAccountRequest {
    pub password: Option<String>,
}
