use anyhow::anyhow;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{password, session, state::AuthConfig, storage, token::TokenCodec};
use crate::api::{
    handlers::{valid_email, valid_username},
    ApiError,
};

#[derive(ToSchema, Deserialize)]
pub struct SignupRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    id: Uuid,
    username: String,
    email: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created; session cookie set", body = CreatedUser),
        (status = 400, description = "Invalid input or duplicate username/email"),
        (status = 409, description = "Concurrent signup raced on the same username/email"),
    ),
    tag = "auth"
)]
pub async fn signup(
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
    codec: Extension<Arc<TokenCodec>>,
    payload: Option<Json<SignupRequest>>,
) -> Result<Response, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("All fields are required".to_string()));
    };

    // Usernames and emails are stored lowercase so uniqueness is case-insensitive.
    let username = request.username.trim().to_lowercase();
    let email = request.email.trim().to_lowercase();
    let password = request.password;

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }

    if !valid_email(&email) {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    if password.len() < password::MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if !valid_username(&username) {
        return Err(ApiError::Validation(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }

    if let Some(field) = storage::find_duplicate(&pool, &username, &email).await? {
        return Err(ApiError::Validation(format!(
            "{} already exists",
            field.as_str()
        )));
    }

    let password_hash = password::hash_password(&password)?;

    let user = match storage::insert_user(&pool, &username, &email, &password_hash).await? {
        storage::InsertOutcome::Created(row) => row,
        storage::InsertOutcome::Conflict => {
            return Err(ApiError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
    };

    let token = codec.issue(user.id)?;
    let cookie = session::session_cookie(&config, &token)
        .map_err(|err| anyhow!("failed to build session cookie: {err}"))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    let created = CreatedUser {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    };
    let body = json!({
        "success": true,
        "message": "User created successfully",
        "user": created,
    });

    Ok((StatusCode::CREATED, headers, Json(body)).into_response())
}
