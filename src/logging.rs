//! Diagnostics on stderr
//!
//! `CURLGEN_LOG` takes an `EnvFilter` directive and overrides the level picked
//! from -v/-q. Generated code goes to stdout, so logs never mix with it.

use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "CURLGEN_LOG";

/// Install the global subscriber.
///
/// A second call only prints a warning; the first subscriber stays installed.
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = result {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}
