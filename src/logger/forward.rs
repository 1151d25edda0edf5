//! Logger that forwards store events to `tracing`.

use super::BanLogger;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Forwards each level to the matching `tracing` macro under the `ipbans` target.
///
/// Metadata, when present, is attached as a `meta` field rendered as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl BanLogger for TracingLogger {
    fn info(&self, msg: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => info!(target: "ipbans", meta = %meta, "{msg}"),
            None => info!(target: "ipbans", "{msg}"),
        }
    }

    fn warn(&self, msg: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => warn!(target: "ipbans", meta = %meta, "{msg}"),
            None => warn!(target: "ipbans", "{msg}"),
        }
    }

    fn error(&self, msg: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => error!(target: "ipbans", meta = %meta, "{msg}"),
            None => error!(target: "ipbans", "{msg}"),
        }
    }

    fn debug(&self, msg: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => debug!(target: "ipbans", meta = %meta, "{msg}"),
            None => debug!(target: "ipbans", "{msg}"),
        }
    }
}
