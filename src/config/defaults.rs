//! Default value functions for configuration.
//!
//! Evaluated at resolve time, never cached, so the working-directory default
//! tracks the process's current directory.

use std::path::PathBuf;

/// Directory used when the working directory cannot be determined.
pub const FALLBACK_SECURITY_DIR: &str = "/tmp/security";

/// Default ban file name inside the security directory.
pub const DEFAULT_BAN_FILE_NAME: &str = "ip-bans.json";

/// `<cwd>/content/security`, or [`FALLBACK_SECURITY_DIR`].
pub fn default_security_dir() -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join("content").join("security"))
        .unwrap_or_else(|_| PathBuf::from(FALLBACK_SECURITY_DIR))
}

pub fn default_ban_file_name() -> String {
    DEFAULT_BAN_FILE_NAME.to_string()
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_filter() -> String {
    "info".to_string()
}
