//! Public profiles, profile editing, link creation, and click tracking.
//!
//! Reads are public; edits require the authenticated principal to own the
//! target username; click tracking is open to any visitor and delegates the
//! increment to a single atomic SQL update.

pub mod actions;
pub mod edit;
pub mod public;
pub(crate) mod storage;
pub mod types;

use crate::api::ApiError;
use url::Url;

/// Default the scheme to `https://` when the client omits it, then require a
/// syntactically valid http(s) URL.
///
/// Parsing happens before any rewriting so inputs that already carry a scheme
/// (`mailto:`, `ftp:`, uppercase `HTTP:`) are judged by that scheme instead of
/// being glued onto an `https://` prefix.
pub(crate) fn normalize_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("Link URL is required".to_string()));
    }

    match Url::parse(trimmed) {
        // The parser lowercases the scheme, so this also accepts `HTTP://...`.
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        Ok(_) => Err(ApiError::Validation(format!("Invalid link URL: {trimmed}"))),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let candidate = format!("https://{trimmed}");
            Url::parse(&candidate)
                .map_err(|_| ApiError::Validation(format!("Invalid link URL: {trimmed}")))?;
            Ok(candidate)
        }
        Err(_) => Err(ApiError::Validation(format!("Invalid link URL: {trimmed}"))),
    }
}
