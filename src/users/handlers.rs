// src/users/handlers.rs

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::models::{
    ChangePasswordRequest, DeleteAccountRequest, MessageResponse, PublicProfile, RecipeSummary,
    UpdateProfileRequest,
};
use super::validators::{ChangePasswordValidator, ProfileUpdateValidator};
use crate::auth::handlers::BCRYPT_COST;
use crate::auth::{AuthedUser, User};
use crate::common::{ApiError, AppState, Validator};
use crate::recipes::models::Recipe;
use crate::services::storage::object_key_from_url;

async fn load_profile(state: &AppState, user: User) -> Result<PublicProfile, ApiError> {
    let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE creator_id = ?")
        .bind(&user.id)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(PublicProfile {
        id: user.id,
        name: user.name,
        avatar_url: user.avatar_url,
        created_at: user.created_at,
        recipes: recipes.into_iter().map(RecipeSummary::from).collect(),
    })
}

/// GET /api/user/profile/:name - Public profile lookup by user name
pub async fn get_profile_by_name(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(user_name): Path<String>,
) -> Result<Json<PublicProfile>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = ?")
        .bind(&user_name)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let profile = load_profile(&state, user).await?;
    Ok(Json(profile))
}

/// GET /api/user/profile - Profile of the authenticated user
pub async fn get_own_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<PublicProfile>, ApiError> {
    let state = state_lock.read().await.clone();

    // a valid token can outlive its account
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let profile = load_profile(&state, user).await?;
    Ok(Json(profile))
}

/// PUT /api/user/profile - Partial profile update
pub async fn update_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = ProfileUpdateValidator.validate(&request);
    if !validation.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation.errors,
            "Profile update validation failed"
        );
        return Err(ApiError::from(validation));
    }

    // only the supplied fields are written
    sqlx::query(
        "UPDATE users SET name = COALESCE(?, name), avatar_url = COALESCE(?, avatar_url) WHERE id = ?",
    )
    .bind(request.new_name.as_deref())
    .bind(request.new_avatar_url.as_deref())
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.id, "User profile updated");

    Ok(Json(MessageResponse {
        message: "User profile has been successfully updated".to_string(),
    }))
}

/// PUT /api/user/password - Change the stored password
pub async fn change_password(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    // validated before any lookup or hash comparison
    let validation = ChangePasswordValidator.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let old_password_matches =
        bcrypt::verify(&request.old_password, &user.password_hash).map_err(|e| {
            error!(error = %e, user_id = %authed.id, "Password verification failed");
            ApiError::InternalServer("Failed to verify password".to_string())
        })?;

    if !old_password_matches {
        warn!(user_id = %authed.id, "Password change rejected: old password mismatch");
        return Err(ApiError::BadRequest(
            "Current password does not match".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&request.new_password, BCRYPT_COST).map_err(|e| {
        error!(error = %e, user_id = %authed.id, "Password hashing failed");
        ApiError::InternalServer("Failed to hash password".to_string())
    })?;

    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(&password_hash)
        .bind(&authed.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.id, "Password changed");

    Ok(Json(MessageResponse {
        message: "Password has been successfully updated".to_string(),
    }))
}

/// DELETE /api/user/account - Delete the account and its recipe images
///
/// The submitted password must re-verify even though the session is valid.
/// Recipe rows are left in place; only their stored images and the user
/// row are removed.
pub async fn delete_account(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<DeleteAccountRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Password is required".to_string()))?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_matches = bcrypt::verify(&password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = %authed.id, "Password verification failed");
        ApiError::InternalServer("Failed to verify password".to_string())
    })?;

    if !password_matches {
        warn!(user_id = %authed.id, "Account deletion rejected: password mismatch");
        return Err(ApiError::BadRequest("Invalid password".to_string()));
    }

    let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE creator_id = ?")
        .bind(&authed.id)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // every owned image is removed before the user row goes away
    for recipe in &recipes {
        let object_key = object_key_from_url(&recipe.image_url);
        state.storage.delete_object(object_key).await?;
    }

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&authed.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        deleted_images = recipes.len(),
        "Account deleted"
    );

    Ok(Json(MessageResponse {
        message: "Account has been successfully deleted".to_string(),
    }))
}
