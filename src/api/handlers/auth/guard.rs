//! Session guard for page navigation.
//!
//! Flow Overview: classify the request path, derive the token state from the
//! session cookie, and either pass the request through or redirect. The guard
//! runs once per request ahead of every route handler and never mutates the
//! token or the store.
//!
//! The JSON API under `/api/` (and `/health`, `/`) is exempt: those endpoints
//! enforce their own auth and public profile reads must stay reachable
//! without a session.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use std::sync::Arc;

use super::{session, token::TokenCodec};

/// Where an authenticated user lands when skipping login/signup.
const DASHBOARD_ROUTE: &str = "/dashboard";
/// Safe public landing for unauthenticated access to protected pages.
const LANDING_ROUTE: &str = "/";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteClass {
    /// Always passes through, regardless of token state.
    Public,
    /// Login/signup pages, meant for anonymous users.
    AuthOnly,
    /// Profile pages, requiring a valid session.
    Protected,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenState {
    Missing,
    Valid,
    /// Present but failing signature, payload, or expiry checks.
    Invalid,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GuardDecision {
    Next,
    Redirect(&'static str),
}

/// Classify a request path for the guard.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if path == "/api" || path.starts_with("/api/") || path == "/health" {
        return RouteClass::Public;
    }
    match path {
        "/login" | "/signup" => RouteClass::AuthOnly,
        _ if path == "/profile" || path.starts_with("/profile/") => RouteClass::Protected,
        _ => RouteClass::Public,
    }
}

/// The guard's decision table. Pure so every combination is testable.
#[must_use]
pub const fn decide(class: RouteClass, state: TokenState) -> GuardDecision {
    match (class, state) {
        // Already logged in, skip login/signup.
        (RouteClass::AuthOnly, TokenState::Valid) => GuardDecision::Redirect(DASHBOARD_ROUTE),
        (RouteClass::Protected, TokenState::Missing | TokenState::Invalid) => {
            GuardDecision::Redirect(LANDING_ROUTE)
        }
        _ => GuardDecision::Next,
    }
}

/// Axum middleware entry point.
pub async fn session_guard(
    Extension(codec): Extension<Arc<TokenCodec>>,
    request: Request,
    next: Next,
) -> Response {
    let class = classify(request.uri().path());
    if class == RouteClass::Public {
        return next.run(request).await;
    }

    let state = token_state(request.headers(), &codec);
    match decide(class, state) {
        GuardDecision::Next => next.run(request).await,
        GuardDecision::Redirect(target) => Redirect::temporary(target).into_response(),
    }
}

fn token_state(headers: &HeaderMap, codec: &TokenCodec) -> TokenState {
    match session::extract_session_token(headers) {
        None => TokenState::Missing,
        Some(token) if codec.verify(&token).is_some() => TokenState::Valid,
        Some(_) => TokenState::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};
    use uuid::Uuid;

    #[test]
    fn classify_splits_pages_from_api() {
        assert_eq!(classify("/"), RouteClass::Public);
        assert_eq!(classify("/dashboard"), RouteClass::Public);
        assert_eq!(classify("/login"), RouteClass::AuthOnly);
        assert_eq!(classify("/signup"), RouteClass::AuthOnly);
        assert_eq!(classify("/profile"), RouteClass::Protected);
        assert_eq!(classify("/profile/alice"), RouteClass::Protected);
        assert_eq!(classify("/profile/alice/edit"), RouteClass::Protected);

        // The JSON API enforces its own auth.
        assert_eq!(classify("/api/signup"), RouteClass::Public);
        assert_eq!(classify("/api/profile/alice"), RouteClass::Public);
        assert_eq!(classify("/health"), RouteClass::Public);
    }

    #[test]
    fn valid_token_skips_auth_only_pages() {
        assert_eq!(
            decide(RouteClass::AuthOnly, TokenState::Valid),
            GuardDecision::Redirect("/dashboard")
        );
    }

    #[test]
    fn missing_or_invalid_token_leaves_protected_pages() {
        assert_eq!(
            decide(RouteClass::Protected, TokenState::Missing),
            GuardDecision::Redirect("/")
        );
        assert_eq!(
            decide(RouteClass::Protected, TokenState::Invalid),
            GuardDecision::Redirect("/")
        );
    }

    #[test]
    fn everything_else_passes_through() {
        for state in [TokenState::Missing, TokenState::Valid, TokenState::Invalid] {
            assert_eq!(decide(RouteClass::Public, state), GuardDecision::Next);
        }
        assert_eq!(
            decide(RouteClass::AuthOnly, TokenState::Missing),
            GuardDecision::Next
        );
        assert_eq!(
            decide(RouteClass::AuthOnly, TokenState::Invalid),
            GuardDecision::Next
        );
        assert_eq!(
            decide(RouteClass::Protected, TokenState::Valid),
            GuardDecision::Next
        );
    }

    #[tokio::test]
    async fn middleware_redirects_per_decision_table() {
        use axum::{
            body::Body,
            http::{header::LOCATION, Request, StatusCode},
            routing::get,
            Router,
        };
        use tower::ServiceExt;

        let codec = Arc::new(TokenCodec::new(b"guard-test-secret", 3600));
        let app = Router::new()
            .route("/login", get(|| async { "login" }))
            .route("/profile/:username", get(|| async { "profile" }))
            .layer(axum::middleware::from_fn(session_guard))
            .layer(Extension(codec.clone()));

        // Logged-in user navigating to /login lands on the dashboard.
        let token = codec.issue(Uuid::new_v4()).unwrap();
        let request = Request::builder()
            .uri("/login")
            .header(COOKIE, format!("token={token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/dashboard");

        // Anonymous user navigating to a protected page lands on /.
        let request = Request::builder()
            .uri("/profile/alice")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");

        // Anonymous user on /login passes through to the handler.
        let request = Request::builder()
            .uri("/login")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn token_state_distinguishes_missing_valid_invalid() {
        let codec = TokenCodec::new(b"guard-test-secret", 3600);

        let headers = HeaderMap::new();
        assert_eq!(token_state(&headers, &codec), TokenState::Missing);

        let token = codec.issue(Uuid::new_v4()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("token={token}")).unwrap(),
        );
        assert_eq!(token_state(&headers, &codec), TokenState::Valid);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token=garbage"));
        assert_eq!(token_state(&headers, &codec), TokenState::Invalid);
    }
}
