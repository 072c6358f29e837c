use anyhow::anyhow;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;

use super::{password, session, state::AuthConfig, storage, token::TokenCodec};
use crate::api::ApiError;

// One generic message for every credential failure so responses never
// disclose whether the email or the password was wrong.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookie set"),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Unknown email or wrong password"),
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
    codec: Extension<Arc<TokenCodec>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Response, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let email = request.email.trim().to_lowercase();
    let password = request.password;

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let Some(user) = storage::lookup_credentials(&pool, &email).await? else {
        return Err(ApiError::Authentication(INVALID_CREDENTIALS.to_string()));
    };

    if !password::verify_password(&user.password_hash, &password) {
        return Err(ApiError::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    let token = codec.issue(user.id)?;
    let cookie = session::session_cookie(&config, &token)
        .map_err(|err| anyhow!("failed to build session cookie: {err}"))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    let body = json!({
        "success": true,
        "message": "Login successful",
        "user": {
            "id": user.id,
            "username": user.username,
            "email": user.email,
        },
    });

    Ok((StatusCode::OK, headers, Json(body)).into_response())
}
