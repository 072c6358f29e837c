//! Ownership-gated profile editing.
//!
//! Flow Overview:
//! 1) Authenticate the caller and resolve their principal.
//! 2) Compare the principal's username against the path username; a mismatch
//!    is a 403 even when both users exist.
//! 3) Apply the partial update transactionally and return the fresh view.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    storage,
    types::{EditProfileRequest, UserView},
};
use crate::api::{
    handlers::{
        auth::{principal, TokenCodec},
        valid_email,
    },
    ApiError,
};

#[utoipa::path(
    put,
    path = "/api/profile/{username}/edit",
    params(
        ("username" = String, Path, description = "Profile owner's username"),
    ),
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserView),
        (status = 400, description = "Missing body or invalid email"),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller does not own this profile"),
        (status = 409, description = "Email already taken by another account"),
    ),
    tag = "profile"
)]
pub async fn edit_profile(
    Path(username): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    codec: Extension<Arc<TokenCodec>>,
    payload: Option<Json<EditProfileRequest>>,
) -> Result<Response, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation(
            "Profile data is required".to_string(),
        ));
    };

    let username = username.trim().to_lowercase();
    let principal = principal::require_auth(&headers, &codec, &pool).await?;
    ensure_owner(&principal.username, &username)?;

    let email = match request.email {
        Some(email) => {
            let email = email.trim().to_lowercase();
            if email.is_empty() {
                None
            } else if valid_email(&email) {
                Some(email)
            } else {
                return Err(ApiError::Validation("Invalid email format".to_string()));
            }
        }
        None => None,
    };

    let update = storage::ProfileUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        email,
        bio: request.bio,
        avatar: request.avatar,
        title: request.title,
        description: request.description,
    };

    match storage::apply_profile_update(&pool, principal.user_id, update).await? {
        storage::EditOutcome::Updated(view) => {
            let body = json!({
                "success": true,
                "message": "Profile updated successfully",
                "data": view,
            });
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        storage::EditOutcome::EmailConflict => {
            Err(ApiError::Conflict("Email already exists".to_string()))
        }
    }
}

/// Only the owner may edit a profile, even when both users exist.
fn ensure_owner(principal_username: &str, path_username: &str) -> Result<(), ApiError> {
    if principal_username == path_username {
        Ok(())
    } else {
        Err(ApiError::Authorization(
            "You can only edit your own profile".to_string(),
        ))
    }
}
