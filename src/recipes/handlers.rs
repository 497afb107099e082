// src/recipes/handlers.rs

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::duration::parse_duration_seconds;
use super::models::{
    CreateRecipeFields, CreatorSummary, Recipe, RecipeDetailResponse, SearchRecipesParams,
    SearchResponse,
};
use super::search::RecipeQuery;
use super::validators::{image_extension, RecipeValidator, SearchQueryValidator};
use crate::auth::AuthedUser;
use crate::common::{generate_recipe_id, ApiError, AppState, Validator};
use crate::services::storage::object_key_from_url;
use crate::users::models::MessageResponse;

/// GET /api/recipes/:id - Fetch one recipe with its creator summary
pub async fn get_recipe_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(recipe_id): Path<String>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(&recipe_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    let creator = sqlx::query_as::<_, CreatorSummary>(
        "SELECT id, name, avatar_url FROM users WHERE id = ?",
    )
    .bind(&recipe.creator_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(recipe_id = %recipe_id, "Loaded recipe details");

    Ok(Json(RecipeDetailResponse {
        recipe: recipe.into(),
        creator,
    }))
}

/// GET /api/recipes/search - Filtered, paginated catalog search
pub async fn search_recipes(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<SearchRecipesParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = SearchQueryValidator.validate(&params);
    if !validation.is_valid {
        warn!(errors = ?validation.errors, "Recipe search validation failed");
        return Err(ApiError::from(validation));
    }

    let query = RecipeQuery::from_params(&params)?;
    let response = query.execute(&state.db).await?;

    debug!(
        result_count = response.recipes.len(),
        total_pages = response.total_pages,
        "Recipe search executed"
    );

    Ok(Json(response))
}

// Array fields may arrive either as repeated form fields or as one
// JSON-encoded array.
fn append_array_field(slot: &mut Option<Vec<String>>, text: String) {
    let values = slot.get_or_insert_with(Vec::new);
    if text.trim_start().starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<Vec<String>>(&text) {
            values.extend(parsed);
            return;
        }
    }
    values.push(text);
}

/// POST /api/recipes - Create a recipe with an uploaded image
pub async fn create_recipe(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let mut fields = CreateRecipeFields::default();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Malformed multipart body".to_string()))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == "image" {
            let filename = field
                .file_name()
                .ok_or_else(|| ApiError::BadRequest("Image filename is required".to_string()))?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| ApiError::BadRequest("Failed to read image data".to_string()))?;
            image = Some((filename, data.to_vec()));
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|_| ApiError::BadRequest("Malformed multipart body".to_string()))?;

        match name.as_str() {
            "title" => fields.title = Some(text),
            "description" => fields.description = Some(text),
            "steps" => append_array_field(&mut fields.steps, text),
            "ingredients" => append_array_field(&mut fields.ingredients, text),
            "cookTime" => fields.cook_time = Some(text),
            "category" => fields.category = Some(text),
            "difficulty" => fields.difficulty = Some(text),
            _ => {}
        }
    }

    let validation = RecipeValidator.validate(&fields);
    if !validation.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation.errors,
            "Recipe creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let (image_name, image_bytes) =
        image.ok_or_else(|| ApiError::BadRequest("Image file is required".to_string()))?;

    let extension = image_extension(&image_name)
        .ok_or_else(|| ApiError::BadRequest("Invalid image format".to_string()))?;

    let cook_time = fields.cook_time.unwrap_or_default();
    let cook_time_seconds = parse_duration_seconds(&cook_time)?;

    // the row stores the returned URL, so the upload happens first; a
    // failed upload leaves no row behind
    let object_key = format!("{}.{}", Uuid::new_v4(), extension);
    let content_type = match extension {
        "png" => "image/png",
        _ => "image/jpeg",
    };
    let image_url = state
        .storage
        .upload_image(image_bytes, content_type, &object_key)
        .await?;

    let recipe_id = generate_recipe_id();
    let steps_json = serde_json::to_string(&fields.steps.unwrap_or_default())
        .unwrap_or_else(|_| "[]".to_string());
    let ingredients_json = serde_json::to_string(&fields.ingredients.unwrap_or_default())
        .unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        r#"
        INSERT INTO recipes (
            id, creator_id, title, description, steps, ingredients,
            cook_time_seconds, cook_time, category, difficulty, image_url, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&recipe_id)
    .bind(&authed.id)
    .bind(fields.title.as_deref().unwrap_or_default())
    .bind(fields.description.as_deref().unwrap_or_default())
    .bind(&steps_json)
    .bind(&ingredients_json)
    .bind(cook_time_seconds)
    .bind(&cook_time)
    .bind(fields.category.as_deref().unwrap_or_default())
    .bind(fields.difficulty.as_deref().unwrap_or_default())
    .bind(&image_url)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        recipe_id = %recipe_id,
        user_id = %authed.id,
        image_key = %object_key,
        "Recipe created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Recipe has been successfully created".to_string(),
        }),
    ))
}

/// DELETE /api/recipes/:id - Delete an owned recipe and its stored image
pub async fn delete_recipe(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(&recipe_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    if recipe.creator_id != authed.id {
        warn!(
            recipe_id = %recipe_id,
            user_id = %authed.id,
            "Recipe deletion rejected: caller is not the creator"
        );
        return Err(ApiError::Forbidden(
            "Only the creator can delete this recipe".to_string(),
        ));
    }

    // the object goes first; the row is removed only once its image is
    // confirmed gone
    let object_key = object_key_from_url(&recipe.image_url);
    state.storage.delete_object(object_key).await?;

    sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(&recipe_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(recipe_id = %recipe_id, user_id = %authed.id, "Recipe deleted");

    Ok(Json(MessageResponse {
        message: "Recipe has been successfully deleted".to_string(),
    }))
}
