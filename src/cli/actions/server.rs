use crate::api;
use anyhow::Result;
use std::fmt;

pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: String,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
    pub frontend_origin: String,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &self.dsn)
            .field("jwt_secret", &"***")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .field("frontend_origin", &self.frontend_origin)
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let auth_config = api::handlers::auth::AuthConfig::new(args.jwt_secret)
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_cookie_secure(args.cookie_secure);

    api::new(args.port, args.dsn, auth_config, &args.frontend_origin).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_the_secret() {
        let args = Args {
            port: 8080,
            dsn: "postgres://localhost:5432/devlinks".to_string(),
            jwt_secret: "super-secret".to_string(),
            session_ttl_seconds: 604_800,
            cookie_secure: false,
            frontend_origin: "http://localhost:3000".to_string(),
        };
        let rendered = format!("{args:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
