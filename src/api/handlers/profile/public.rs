use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;

use super::{storage, types::UserView};
use crate::api::ApiError;

#[utoipa::path(
    get,
    path = "/api/profile/{username}",
    params(
        ("username" = String, Path, description = "Profile owner's username"),
    ),
    responses(
        (status = 200, description = "Public profile with links", body = UserView),
        (status = 404, description = "No account with that username"),
    ),
    tag = "profile"
)]
pub async fn public_profile(
    Path(username): Path<String>,
    pool: Extension<PgPool>,
) -> Result<Response, ApiError> {
    // Usernames are stored lowercase; fold the path segment to match.
    let username = username.trim().to_lowercase();

    match storage::fetch_user_view_by_username(&pool, &username).await? {
        Some(view) => {
            let body = json!({ "success": true, "data": view });
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}
