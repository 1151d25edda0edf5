//! Tracing subscriber setup and span constructors.

use crate::config::LogConfig;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Calling this twice is a no-op.
pub fn init(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Standardized span constructors.
pub mod spans {
    use std::path::Path;
    use tracing::{Span, info_span};

    /// Create a span for a command run against a ban file.
    pub fn command(name: &str, file: &Path, address: Option<&str>) -> Span {
        if let Some(address) = address {
            info_span!("command", name = %name, file = %file.display(), ip = %address)
        } else {
            info_span!("command", name = %name, file = %file.display())
        }
    }
}
