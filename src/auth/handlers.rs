//! Authentication handlers

use axum::extract::{Extension, Json};
use axum::http::{header::SET_COOKIE, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::extractors::SESSION_COOKIE;
use super::models::{LoginRequest, RegisterRequest, User};
use super::tokens::{LOGIN_SESSION_TTL_SECS, REGISTRATION_SESSION_TTL_SECS};
use super::validators::RegisterValidator;
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState, Validator};
use crate::users::models::MessageResponse;

/// bcrypt work factor for stored password hashes
pub const BCRYPT_COST: u32 = 10;

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token, max_age_secs
    )
}

fn clear_session_cookie() -> String {
    format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE
    )
}

/// POST /api/auth/register - Create an account and open a session
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = RegisterValidator.validate(&payload);
    if !validation.is_valid {
        warn!(errors = ?validation.errors, "Registration validation failed");
        return Err(ApiError::from(validation));
    }

    let name = payload.name.unwrap_or_default();

    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = ? OR email = ?")
        .bind(&name)
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        warn!(
            email = %safe_email_log(&payload.email),
            "Registration rejected: name or email already taken"
        );
        return Err(ApiError::Conflict(
            "User with this name or email already exists".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&payload.password, BCRYPT_COST).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        ApiError::InternalServer("Failed to hash password".to_string())
    })?;

    let user_id = generate_user_id();

    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, datetime('now'))",
    )
    .bind(&user_id)
    .bind(&name)
    .bind(&payload.email)
    .bind(&password_hash)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let token = state
        .tokens
        .issue(&user_id, REGISTRATION_SESSION_TTL_SECS)
        .map_err(ApiError::from)?;

    info!(
        user_id = %user_id,
        email = %safe_email_log(&payload.email),
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(
            SET_COOKIE,
            session_cookie(&token, REGISTRATION_SESSION_TTL_SECS),
        )]),
        Json(MessageResponse {
            message: "User has been successfully registered".to_string(),
        }),
    ))
}

/// POST /api/auth/login - Verify credentials and open a session
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // the same failure for unknown email and bad password
    let Some(user) = user else {
        warn!(
            email = %safe_email_log(&payload.email),
            "Login failed: unknown email"
        );
        return Err(ApiError::BadRequest("Invalid email or password".to_string()));
    };

    let password_matches = bcrypt::verify(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = %user.id, "Password verification failed");
        ApiError::InternalServer("Failed to verify password".to_string())
    })?;

    if !password_matches {
        warn!(user_id = %user.id, "Login failed: password mismatch");
        return Err(ApiError::BadRequest("Invalid email or password".to_string()));
    }

    let token = state
        .tokens
        .issue(&user.id, LOGIN_SESSION_TTL_SECS)
        .map_err(ApiError::from)?;

    info!(user_id = %user.id, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token, LOGIN_SESSION_TTL_SECS))]),
        Json(MessageResponse {
            message: "Login successful".to_string(),
        }),
    ))
}

/// GET /api/auth/logout - Drop the session cookie
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}
