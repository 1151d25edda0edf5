//! Store configuration: overrides, resolution and reset.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::defaults::{default_ban_file_name, default_security_dir};
use crate::id::{IdGenerator, UuidGenerator};
use crate::logger::{BanLogger, NoopLogger};

/// Overrides for a [`BanStore`](crate::BanStore).
///
/// Every field is optional. Unset fields are filled in by [`resolve`](Self::resolve)
/// each time it is called, so defaults that depend on the environment are
/// never frozen at construction time.
#[derive(Clone, Default)]
pub struct BanStoreConfig {
    /// Directory holding the ban file.
    pub security_dir: Option<PathBuf>,
    /// File name inside `security_dir`.
    pub ban_file_name: Option<String>,
    /// Sink for store events.
    pub logger: Option<Arc<dyn BanLogger>>,
    /// Source of ban record ids.
    pub id_generator: Option<Arc<dyn IdGenerator>>,
}

/// Effective configuration with every default applied.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub security_dir: PathBuf,
    pub ban_file_name: String,
    pub logger: Arc<dyn BanLogger>,
    pub id_generator: Arc<dyn IdGenerator>,
}

impl BanStoreConfig {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_security_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.security_dir = Some(dir.into());
        self
    }

    pub fn with_ban_file_name(mut self, name: impl Into<String>) -> Self {
        self.ban_file_name = Some(name.into());
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn BanLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Merge `partial` into the current overrides.
    ///
    /// Fields set in `partial` replace the current value; unset fields are left alone.
    pub fn configure(&mut self, partial: BanStoreConfig) {
        if let Some(dir) = partial.security_dir {
            self.security_dir = Some(dir);
        }
        if let Some(name) = partial.ban_file_name {
            self.ban_file_name = Some(name);
        }
        if let Some(logger) = partial.logger {
            self.logger = Some(logger);
        }
        if let Some(generator) = partial.id_generator {
            self.id_generator = Some(generator);
        }
    }

    /// Compute the effective configuration.
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            security_dir: self
                .security_dir
                .clone()
                .unwrap_or_else(default_security_dir),
            ban_file_name: self
                .ban_file_name
                .clone()
                .unwrap_or_else(default_ban_file_name),
            logger: self
                .logger
                .clone()
                .unwrap_or_else(|| Arc::new(NoopLogger) as Arc<dyn BanLogger>),
            id_generator: self
                .id_generator
                .clone()
                .unwrap_or_else(|| Arc::new(UuidGenerator) as Arc<dyn IdGenerator>),
        }
    }

    /// Drop every override.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ResolvedConfig {
    /// Full path of the ban file.
    pub fn ban_file_path(&self) -> PathBuf {
        self.security_dir.join(&self.ban_file_name)
    }
}

impl fmt::Debug for BanStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BanStoreConfig")
            .field("security_dir", &self.security_dir)
            .field("ban_file_name", &self.ban_file_name)
            .field("logger", &self.logger.as_ref().map(|_| "custom"))
            .field("id_generator", &self.id_generator.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("security_dir", &self.security_dir)
            .field("ban_file_name", &self.ban_file_name)
            .finish_non_exhaustive()
    }
}
