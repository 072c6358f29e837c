//! Session token codec.
//!
//! Tokens are self-contained: a signed `HS256` payload carrying the user id
//! and issue time, expiring a fixed window after issuance. Nothing is stored
//! server-side, so a token stays cryptographically valid until its natural
//! expiry even after logout.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    /// Issue a signed token for the user, valid for the configured window.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    // Separate seam so expiry behavior is testable without a clock.
    pub(crate) fn issue_at(&self, user_id: Uuid, issued_at: OffsetDateTime) -> Result<String> {
        let iat = issued_at.unix_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp: iat + self.ttl_seconds,
        };
        encode(&Header::default(), &claims, &self.encoding).context("failed to sign session token")
    }

    /// Verify signature and expiry, returning the user id the token carries.
    ///
    /// Any failure (bad signature, malformed payload, expired) reads as
    /// `None`; callers treat it exactly like a missing token.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation).ok()?;
        Uuid::parse_str(&data.claims.sub).ok()
    }
}
