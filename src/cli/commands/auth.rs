use clap::{Arg, Command};

pub const ARG_JWT_SECRET: &str = "jwt-secret";

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long("jwt-secret")
                .help("Secret used to sign session tokens")
                .long_help(
                    "Secret used to sign session tokens. Keep it out of source control; prefer the DEVLINKS_JWT_SECRET environment variable.",
                )
                .env("DEVLINKS_JWT_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Session token and cookie TTL in seconds")
                .env("DEVLINKS_SESSION_TTL_SECONDS")
                .default_value("604800")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("cookie-secure")
                .long("cookie-secure")
                .help("Mark the session cookie Secure (set in production behind HTTPS)")
                .env("DEVLINKS_COOKIE_SECURE")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("frontend-origin")
                .long("frontend-origin")
                .help("Frontend origin allowed by CORS")
                .env("DEVLINKS_FRONTEND_ORIGIN")
                .default_value("http://localhost:3000"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_defaults_to_seven_days() {
        temp_env::with_vars([("DEVLINKS_SESSION_TTL_SECONDS", None::<&str>)], || {
            let command = with_args(Command::new("test"));
            let matches = command
                .try_get_matches_from(vec!["test", "--jwt-secret", "s3cret"])
                .unwrap();
            assert_eq!(
                matches.get_one::<i64>("session-ttl-seconds").copied(),
                Some(60 * 60 * 24 * 7)
            );
            assert!(!matches.get_flag("cookie-secure"));
        });
    }
}
