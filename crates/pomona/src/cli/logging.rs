//! Diagnostic logging to stderr.

use std::{env, io};

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "POMONA_LOG";

/// Maps the `-v` count to a default filter directive.
fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber.
///
/// `POMONA_LOG` takes precedence over `-v` when both are given.
pub fn init(verbose: u8) {
    let filter = match env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::new(directive),
        Err(_) => EnvFilter::new(level_for(verbose)),
    };

    // A subscriber may already be installed when commands run inside tests.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
