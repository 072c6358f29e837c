//! Database helpers for profiles and links.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{LinkView, ProfileView, UserView};
use crate::api::handlers::auth::is_unique_violation;

/// Normalized values for a bulk link insert; URLs are already validated.
pub(crate) struct NewLinkRow {
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) description: Option<String>,
}

/// Per-field update for an account and its profile headline. `None` means
/// leave the stored value as is.
#[derive(Default)]
pub(crate) struct ProfileUpdate {
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) avatar: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

pub(crate) enum EditOutcome {
    Updated(UserView),
    /// The requested email is already taken by another account.
    EmailConflict,
}

pub(crate) async fn resolve_user_id(pool: &PgPool, username: &str) -> Result<Option<Uuid>> {
    let query = "SELECT id FROM users WHERE username = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to resolve username")?;

    Ok(row.map(|row| row.get("id")))
}

pub(crate) async fn fetch_user_view_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserView>> {
    let query = r"
        SELECT id, username, email, first_name, last_name, avatar_url, bio, created_at
        FROM users WHERE username = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch user by username")?;

    match row {
        Some(row) => Ok(Some(hydrate_view(pool, &row).await?)),
        None => Ok(None),
    }
}

pub(crate) async fn fetch_user_view_by_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserView>> {
    let query = r"
        SELECT id, username, email, first_name, last_name, avatar_url, bio, created_at
        FROM users WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch user by id")?;

    match row {
        Some(row) => Ok(Some(hydrate_view(pool, &row).await?)),
        None => Ok(None),
    }
}

/// Attach the profile headline and link list to an account row.
async fn hydrate_view(pool: &PgPool, user: &sqlx::postgres::PgRow) -> Result<UserView> {
    let user_id: Uuid = user.get("id");

    let query = "SELECT title, description FROM profiles WHERE user_id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let profile = sqlx::query(query)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch profile")?
        .map(|row| ProfileView {
            title: row.get("title"),
            description: row.get("description"),
        });

    let query = r"
        SELECT id, title, url, description, clicks, created_at
        FROM links WHERE user_id = $1
        ORDER BY created_at DESC
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let links = sqlx::query(query)
        .bind(user_id)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to fetch links")?
        .iter()
        .map(|row| LinkView {
            id: row.get("id"),
            title: row.get("title"),
            url: row.get("url"),
            description: row.get("description"),
            clicks: row.get("clicks"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(UserView {
        id: user_id,
        username: user.get("username"),
        email: user.get("email"),
        first_name: user.get("first_name"),
        last_name: user.get("last_name"),
        avatar: user.get("avatar_url"),
        bio: user.get("bio"),
        created_at: user.get("created_at"),
        profile,
        links,
    })
}

/// Atomic click increment. Returns the new count, or `None` when the link
/// does not exist or belongs to a different user.
pub(crate) async fn increment_click(
    pool: &PgPool,
    user_id: Uuid,
    link_id: Uuid,
) -> Result<Option<i64>> {
    let query = r"
        UPDATE links SET clicks = clicks + 1
        WHERE id = $1 AND user_id = $2
        RETURNING clicks
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(link_id)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to increment clicks")?;

    Ok(row.map(|row| row.get("clicks")))
}

pub(crate) async fn insert_link(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    url: &str,
    description: Option<&str>,
) -> Result<LinkView> {
    let query = r"
        INSERT INTO links (user_id, title, url, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, url, description, clicks, created_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .bind(title)
        .bind(url)
        .bind(description)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert link")?;

    Ok(LinkView {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        description: row.get("description"),
        clicks: row.get("clicks"),
        created_at: row.get("created_at"),
    })
}

/// Insert a batch of links in one transaction; either all land or none do.
pub(crate) async fn insert_links_bulk(
    pool: &PgPool,
    user_id: Uuid,
    links: &[NewLinkRow],
) -> Result<u64> {
    let mut tx: Transaction<'_, Postgres> = pool
        .begin()
        .await
        .context("failed to begin bulk insert transaction")?;

    let query = "INSERT INTO links (user_id, title, url, description) VALUES ($1, $2, $3, $4)";
    let mut count = 0;
    for link in links {
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(user_id)
            .bind(&link.title)
            .bind(&link.url)
            .bind(&link.description)
            .execute(&mut *tx)
            .instrument(span)
            .await
            .context("failed to insert link in bulk")?;
        count += result.rows_affected();
    }

    tx.commit()
        .await
        .context("failed to commit bulk insert transaction")?;

    Ok(count)
}

/// Apply a partial update to the account row and upsert the profile headline,
/// in one transaction.
pub(crate) async fn apply_profile_update(
    pool: &PgPool,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<EditOutcome> {
    let mut tx: Transaction<'_, Postgres> = pool
        .begin()
        .await
        .context("failed to begin profile update transaction")?;

    let query = r"
        UPDATE users SET
            first_name = COALESCE($2, first_name),
            last_name  = COALESCE($3, last_name),
            email      = COALESCE($4, email),
            bio        = COALESCE($5, bio),
            avatar_url = COALESCE($6, avatar_url)
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(user_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(&update.bio)
        .bind(&update.avatar)
        .execute(&mut *tx)
        .instrument(span)
        .await;

    match result {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            tx.rollback()
                .await
                .context("failed to roll back profile update")?;
            return Ok(EditOutcome::EmailConflict);
        }
        Err(err) => return Err(err).context("failed to update user"),
    }

    if update.title.is_some() || update.description.is_some() {
        let query = r"
            INSERT INTO profiles (user_id, title, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                title       = COALESCE(EXCLUDED.title, profiles.title),
                description = COALESCE(EXCLUDED.description, profiles.description)
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(user_id)
            .bind(&update.title)
            .bind(&update.description)
            .execute(&mut *tx)
            .instrument(span)
            .await
            .context("failed to upsert profile")?;
    }

    tx.commit()
        .await
        .context("failed to commit profile update transaction")?;

    match fetch_user_view_by_id(pool, user_id).await? {
        Some(view) => Ok(EditOutcome::Updated(view)),
        None => anyhow::bail!("user {user_id} vanished during profile update"),
    }
}
