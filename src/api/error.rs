//! Central error type + Axum integration.
//!
//! Every domain error is converted to a stable `{"success": false, "error"}`
//! JSON body at the boundary. Internal failures are logged with their full
//! chain and rendered with a generic message so storage details never leak to
//! clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (400).
    #[error("{0}")]
    Validation(String),
    /// Missing, invalid, or expired token (401).
    #[error("{0}")]
    Authentication(String),
    /// Valid identity but insufficient rights (403).
    #[error("{0}")]
    Authorization(String),
    /// No matching user or link (404).
    #[error("{0}")]
    NotFound(String),
    /// Duplicate username or email (409).
    #[error("{0}")]
    Conflict(String),
    /// Storage or other unexpected failure (500).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if let Self::Internal(err) = &self {
            error!("internal error: {err:?}");
            "Something went wrong".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
