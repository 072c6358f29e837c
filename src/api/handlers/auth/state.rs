//! Auth configuration shared across handlers.

use std::fmt;

const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: String,
    session_ttl_seconds: i64,
    cookie_secure: bool,
}

impl AuthConfig {
    #[must_use]
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    #[must_use]
    pub const fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub const fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_seven_days() {
        let config = AuthConfig::new("secret".to_string());
        assert_eq!(config.session_ttl_seconds(), 604_800);
        assert!(!config.cookie_secure());
    }

    #[test]
    fn builders_override_defaults() {
        let config = AuthConfig::new("secret".to_string())
            .with_session_ttl_seconds(3600)
            .with_cookie_secure(true);
        assert_eq!(config.session_ttl_seconds(), 3600);
        assert!(config.cookie_secure());
    }

    #[test]
    fn debug_redacts_the_secret() {
        let config = AuthConfig::new("super-secret".to_string());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
