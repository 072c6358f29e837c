//! Tracing subscriber initialization.
//!
//! Output goes to stderr via the fmt layer; `DEVLINKS_LOG_JSON=1` switches to
//! JSON lines for log shippers. The filter comes from `RUST_LOG` when set,
//! otherwise from the `-v` verbosity count.

use anyhow::Result;
use std::env::var;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Level directives are parsed case-insensitively, so Display output works.
        let level = verbosity_level.unwrap_or(Level::ERROR);
        EnvFilter::new(level.to_string())
    });

    let json_output = var("DEVLINKS_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
