//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::common::{ApiError, AppState};

/// Name of the session cookie carrying the signed token
pub const SESSION_COOKIE: &str = "token";

/// Authenticated user extractor
///
/// Verifies the session token's signature and expiry on every request and
/// exposes the verified subject id. No database access happens here;
/// handlers resolve the user row themselves.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: String,
}

/// Rejection that additionally tells the client to drop its stored session
/// cookie when the token failed verification
pub struct AuthRejection(ApiError);

impl From<ApiError> for AuthRejection {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        if response.status() == StatusCode::UNAUTHORIZED {
            response.headers_mut().append(
                SET_COOKIE,
                HeaderValue::from_static("token=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax"),
            );
        }
        response
    }
}

fn session_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Extension containing the AppState
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AuthRejection::from(ApiError::InternalServer("missing app state".to_string()))
                })?;

        let app_state = state_lock.read().await.clone();

        let token = match session_token(parts) {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing session cookie");
                return Err(ApiError::Unauthorized("Unauthorized".to_string()).into());
            }
        };

        let subject_id = app_state.tokens.verify(&token).map_err(|e| {
            warn!(error = %e, "Session token verification failed");
            AuthRejection::from(ApiError::from(e))
        })?;

        Ok(AuthedUser { id: subject_id })
    }
}
