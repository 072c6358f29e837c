//! Database helpers for user accounts and credentials.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use tracing::Instrument;
use uuid::Uuid;

use super::is_unique_violation;

/// Public projection of a freshly created account (never the hash).
pub(crate) struct UserRow {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: OffsetDateTime,
}

/// Fields needed to verify a login attempt.
pub(super) struct CredentialRow {
    pub(super) id: Uuid,
    pub(super) username: String,
    pub(super) email: String,
    pub(super) password_hash: String,
}

/// Minimal identity resolved from a verified token.
pub(crate) struct PrincipalRow {
    pub(crate) user_id: Uuid,
    pub(crate) username: String,
    pub(crate) email: String,
}

/// Which unique field a signup collides on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum DuplicateField {
    Username,
    Email,
}

impl DuplicateField {
    pub(super) const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
        }
    }
}

/// Outcome when inserting a new user row.
pub(super) enum InsertOutcome {
    Created(UserRow),
    /// Unique violation from a concurrent signup racing past the pre-check.
    Conflict,
}

/// Pre-insert duplicate check so signup can name the colliding field.
pub(super) async fn find_duplicate(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<Option<DuplicateField>> {
    let query = "SELECT username FROM users WHERE username = $1 OR email = $2 LIMIT 1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to check for duplicate user")?;

    Ok(row.map(|row| {
        if row.get::<String, _>("username") == username {
            DuplicateField::Username
        } else {
            DuplicateField::Email
        }
    }))
}

pub(super) async fn insert_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<InsertOutcome> {
    let query = r"
        INSERT INTO users
            (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, created_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(InsertOutcome::Created(UserRow {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            created_at: row.get("created_at"),
        })),
        Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

/// Look up login data by email.
pub(super) async fn lookup_credentials(
    pool: &PgPool,
    email: &str,
) -> Result<Option<CredentialRow>> {
    let query = "SELECT id, username, email, password_hash FROM users WHERE email = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup credentials")?;

    Ok(row.map(|row| CredentialRow {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
    }))
}

/// Resolve a verified token's user id to its account row.
pub(crate) async fn lookup_principal(pool: &PgPool, user_id: Uuid) -> Result<Option<PrincipalRow>> {
    let query = "SELECT id, username, email FROM users WHERE id = $1";
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
        .context("failed to lookup principal")?;

    Ok(row.map(|row| PrincipalRow {
        user_id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
    }))
}
