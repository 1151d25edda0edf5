//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Store overrides and their resolved form (BanStoreConfig, ResolvedConfig)
//! - [`file`]: TOML file configuration for the binary (Config, StoreConfig, LogConfig)
//! - [`defaults`]: Default values, computed when a config is resolved

pub mod defaults;
mod file;
mod types;

pub use file::{Config, ConfigError, LogConfig, StoreConfig};
pub use types::{BanStoreConfig, ResolvedConfig};
