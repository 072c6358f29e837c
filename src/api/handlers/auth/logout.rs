use anyhow::anyhow;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use super::{session, state::AuthConfig};
use crate::api::ApiError;

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cookie cleared"),
    ),
    tag = "auth"
)]
// Always clears the cookie, whether or not a session was present. The token
// itself stays valid until its natural expiry; there is no revocation list.
pub async fn logout(config: Extension<Arc<AuthConfig>>) -> Result<Response, ApiError> {
    let cookie = session::clear_session_cookie(&config)
        .map_err(|err| anyhow!("failed to build clear cookie: {err}"))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    let body = json!({
        "success": true,
        "message": "Logged out successfully",
    });

    Ok((StatusCode::OK, headers, Json(body)).into_response())
}
