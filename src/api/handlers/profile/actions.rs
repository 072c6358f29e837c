//! Click tracking and link creation, multiplexed over one POST route.
//!
//! The body shape selects the operation: `{linkId}` tracks a click,
//! `{title, url}` creates a single link, `{links: [...]}` creates a batch.
//! See [`ProfileAction`] for the dispatch rules.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    normalize_url, storage,
    types::{BulkCreateRequest, CreateLinkRequest, ProfileAction, TrackClickRequest},
};
use crate::api::ApiError;

#[utoipa::path(
    post,
    path = "/api/profile/{username}",
    params(
        ("username" = String, Path, description = "Profile owner's username"),
    ),
    request_body = ProfileAction,
    responses(
        (status = 200, description = "Click recorded"),
        (status = 201, description = "Link(s) created"),
        (status = 400, description = "Body matches no known operation"),
        (status = 404, description = "Unknown username or link"),
    ),
    tag = "profile"
)]
pub async fn profile_action(
    Path(username): Path<String>,
    pool: Extension<PgPool>,
    payload: Option<Json<ProfileAction>>,
) -> Result<Response, ApiError> {
    let Some(Json(action)) = payload else {
        return Err(ApiError::Validation(
            "Invalid request. Provide linkId for click tracking, or title/url for link creation"
                .to_string(),
        ));
    };

    let username = username.trim().to_lowercase();
    let Some(user_id) = storage::resolve_user_id(&pool, &username).await? else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    match action {
        ProfileAction::TrackClick(request) => track_click(&pool, user_id, request).await,
        ProfileAction::CreateLink(request) => create_link(&pool, user_id, request).await,
        ProfileAction::BulkCreate(request) => bulk_create(&pool, user_id, request).await,
    }
}

async fn track_click(
    pool: &PgPool,
    user_id: Uuid,
    request: TrackClickRequest,
) -> Result<Response, ApiError> {
    match storage::increment_click(pool, user_id, request.link_id).await? {
        Some(clicks) => {
            let body = json!({
                "success": true,
                "message": "Click tracked successfully",
                "data": { "linkId": request.link_id, "clicks": clicks },
            });
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => Err(ApiError::NotFound("Link not found".to_string())),
    }
}

async fn create_link(
    pool: &PgPool,
    user_id: Uuid,
    request: CreateLinkRequest,
) -> Result<Response, ApiError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Link title is required".to_string()));
    }
    let url = normalize_url(&request.url)?;

    let link = storage::insert_link(pool, user_id, title, &url, request.description.as_deref())
        .await?;

    let body = json!({
        "success": true,
        "message": "Link created successfully",
        "data": link,
    });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn bulk_create(
    pool: &PgPool,
    user_id: Uuid,
    request: BulkCreateRequest,
) -> Result<Response, ApiError> {
    if request.links.is_empty() {
        return Err(ApiError::Validation(
            "At least one link is required".to_string(),
        ));
    }

    // Validate the whole batch before touching the database so a bad entry
    // cannot leave a partial insert behind.
    let mut rows = Vec::with_capacity(request.links.len());
    for link in &request.links {
        let title = link.title.trim();
        if title.is_empty() {
            return Err(ApiError::Validation("Link title is required".to_string()));
        }
        rows.push(storage::NewLinkRow {
            title: title.to_string(),
            url: normalize_url(&link.url)?,
            description: link.description.clone(),
        });
    }

    let count = storage::insert_links_bulk(pool, user_id, &rows).await?;

    let body = json!({
        "success": true,
        "message": format!("{count} links created successfully"),
        "data": { "count": count },
    });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
