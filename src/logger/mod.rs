//! Logger capability injected into the ban store.

use serde_json::Value;

pub mod forward;
pub mod noop;

pub use forward::TracingLogger;
pub use noop::NoopLogger;

/// Four-level sink for store events.
///
/// Implementations must never panic: the store calls these from its
/// fail-open paths.
pub trait BanLogger: Send + Sync {
    fn info(&self, msg: &str, meta: Option<&Value>);
    fn warn(&self, msg: &str, meta: Option<&Value>);
    fn error(&self, msg: &str, meta: Option<&Value>);
    fn debug(&self, msg: &str, meta: Option<&Value>);
}
