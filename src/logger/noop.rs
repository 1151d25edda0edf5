//! No-op logger that discards all events.
//!
//! Used when the host application does not provide a logger.

use super::BanLogger;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl BanLogger for NoopLogger {
    fn info(&self, _msg: &str, _meta: Option<&Value>) {}

    fn warn(&self, _msg: &str, _meta: Option<&Value>) {}

    fn error(&self, _msg: &str, _meta: Option<&Value>) {}

    fn debug(&self, _msg: &str, _meta: Option<&Value>) {}
}
