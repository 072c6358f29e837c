//! Authenticated principal extraction.
//!
//! Flow Overview: read the session token, verify it through the codec, and
//! resolve the carried user id to an account row. A token that decodes but
//! matches no user is a data-integrity anomaly; it is logged and treated as
//! unauthenticated-equivalent rather than a server error.

use axum::http::HeaderMap;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::{session, storage, token::TokenCodec};
use crate::api::ApiError;

/// Authenticated user context derived from the session token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

/// Resolve the session token into a principal.
///
/// # Errors
/// `Authentication` when the token is missing or fails verification;
/// `NotFound` when the token is valid but the user row is gone.
pub async fn require_auth(
    headers: &HeaderMap,
    codec: &TokenCodec,
    pool: &PgPool,
) -> Result<Principal, ApiError> {
    let Some(token) = session::extract_session_token(headers) else {
        return Err(ApiError::Authentication(
            "No authentication token provided".to_string(),
        ));
    };

    let Some(user_id) = codec.verify(&token) else {
        return Err(ApiError::Authentication("Invalid token".to_string()));
    };

    match storage::lookup_principal(pool, user_id).await? {
        Some(row) => Ok(Principal {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
        }),
        None => {
            warn!("valid token resolved to no user row: {user_id}");
            Err(ApiError::NotFound("User not found".to_string()))
        }
    }
}
