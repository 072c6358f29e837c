//! Authenticated identity resolution.
//!
//! Flow Overview:
//! 1) Verify the session token from the cookie (or bearer header).
//! 2) Resolve the carried user id to the full profile-and-links projection.
//! 3) 401 for missing/invalid tokens, 404 when the token is valid but the
//!    user row is gone (data-integrity anomaly, logged).

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use super::{session, token::TokenCodec};
use crate::api::{handlers::profile, ApiError};

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated user with profile and links", body = profile::types::UserView),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 404, description = "Token valid but user record missing"),
    ),
    tag = "auth"
)]
pub async fn me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    codec: Extension<Arc<TokenCodec>>,
) -> Result<Response, ApiError> {
    let Some(token) = session::extract_session_token(&headers) else {
        return Err(ApiError::Authentication(
            "No authentication token provided".to_string(),
        ));
    };

    let Some(user_id) = codec.verify(&token) else {
        return Err(ApiError::Authentication("Invalid token".to_string()));
    };

    match profile::storage::fetch_user_view_by_id(&pool, user_id).await? {
        Some(view) => {
            let body = json!({ "success": true, "data": view });
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => {
            warn!("valid token resolved to no user row: {user_id}");
            Err(ApiError::NotFound("User not found".to_string()))
        }
    }
}
