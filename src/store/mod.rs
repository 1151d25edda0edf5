//! File-backed IP ban store.
//!
//! Every operation resolves the current configuration, re-reads the whole
//! ban file, and (for mutations) rewrites it. Nothing is cached between
//! calls, so the store always reflects what is on disk.
//!
//! # Failure policy
//!
//! - Reads heal: malformed content is logged and replaced with `[]`.
//! - [`BanStore::is_banned`] fails open: any error is logged and reported
//!   as "not banned".
//! - Mutations surface write errors to the caller.
//!
//! There is no locking. Concurrent writers race and the last write wins.

mod lenient;
mod persistence;
mod types;

pub use types::{AddBanOptions, BanRecord, Expiry, format_timestamp, parse_timestamp};

use crate::config::BanStoreConfig;
use crate::error::BanStoreResult;
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Ban list persisted as a JSON array in `{security_dir}/{ban_file_name}`.
#[derive(Debug, Clone, Default)]
pub struct BanStore {
    config: BanStoreConfig,
}

impl BanStore {
    /// Create a store with the given overrides. Unset fields use defaults.
    pub fn new(config: BanStoreConfig) -> Self {
        Self { config }
    }

    /// Current overrides.
    pub fn config(&self) -> &BanStoreConfig {
        &self.config
    }

    /// Merge `partial` into the store's overrides.
    pub fn configure(&mut self, partial: BanStoreConfig) {
        self.config.configure(partial);
    }

    /// Drop every override.
    pub fn reset_config(&mut self) {
        self.config.reset();
    }

    /// Path of the ban file under the current configuration.
    pub fn ban_file_path(&self) -> PathBuf {
        self.config.resolve().ban_file_path()
    }

    /// Check whether `address` is blocked by any ban in effect right now.
    ///
    /// Never fails: errors are logged and reported as `false`.
    pub async fn is_banned(&self, address: &str) -> bool {
        let cfg = self.config.resolve();
        match persistence::read_all(&cfg).await {
            Ok(bans) => {
                let now = Utc::now();
                bans.iter().any(|ban| ban.is_in_effect_at(address, now))
            }
            Err(e) => {
                let meta = json!({ "error": e.to_string() });
                cfg.logger.error("Error checking IP ban:", Some(&meta));
                false
            }
        }
    }

    /// Append a new active ban for `address` and persist the list.
    ///
    /// Returns the record as written.
    pub async fn add_ban(
        &self,
        address: &str,
        options: AddBanOptions,
    ) -> BanStoreResult<BanRecord> {
        let cfg = self.config.resolve();
        let mut bans = persistence::read_all(&cfg).await?;

        let ban = BanRecord {
            id: cfg.id_generator.generate(),
            ip_address: address.to_string(),
            ip_range_start: options.ip_range_start,
            ip_range_end: options.ip_range_end,
            reason: options.reason,
            banned_by: options.banned_by,
            banned_at: format_timestamp(Utc::now()),
            expires_at: options.expires_at.map(format_timestamp),
            is_active: true,
        };

        bans.push(ban.clone());
        persistence::write_all(&cfg, &bans).await?;

        debug!(
            id = %ban.id,
            ip = %ban.ip_address,
            expires_at = ?ban.expires_at,
            "Added IP ban"
        );
        Ok(ban)
    }

    /// Remove every record whose address is exactly `address`.
    ///
    /// The list is written back even when nothing matched. Returns the number
    /// of records removed.
    pub async fn remove_ban(&self, address: &str) -> BanStoreResult<usize> {
        let cfg = self.config.resolve();
        let mut bans = persistence::read_all(&cfg).await?;

        let before = bans.len();
        bans.retain(|ban| ban.ip_address != address);
        let removed = before - bans.len();

        persistence::write_all(&cfg, &bans).await?;

        debug!(ip = %address, removed, "Removed IP ban");
        Ok(removed)
    }

    /// Deactivate the first record whose address is exactly `address`.
    ///
    /// Range membership is not considered. The file is only rewritten when a
    /// record was found. Returns whether one was.
    pub async fn deactivate_ban(&self, address: &str) -> BanStoreResult<bool> {
        let cfg = self.config.resolve();
        let mut bans = persistence::read_all(&cfg).await?;

        let Some(ban) = bans.iter_mut().find(|ban| ban.ip_address == address) else {
            return Ok(false);
        };
        ban.is_active = false;
        let id = ban.id.clone();

        persistence::write_all(&cfg, &bans).await?;

        debug!(id = %id, ip = %address, "Deactivated IP ban");
        Ok(true)
    }

    /// Records that are active and not expired, in file order.
    pub async fn list_active_bans(&self) -> BanStoreResult<Vec<BanRecord>> {
        let cfg = self.config.resolve();
        let bans = persistence::read_all(&cfg).await?;

        let now = Utc::now();
        Ok(bans
            .into_iter()
            .filter(|ban| ban.is_current_at(now))
            .collect())
    }

    /// Drop every record whose expiry has passed, active or not.
    ///
    /// The file is only rewritten when something was dropped. Returns the
    /// number of records dropped.
    pub async fn cleanup_expired_bans(&self) -> BanStoreResult<usize> {
        let cfg = self.config.resolve();
        let bans = persistence::read_all(&cfg).await?;

        let now = Utc::now();
        let before = bans.len();
        let kept: Vec<BanRecord> = bans
            .into_iter()
            .filter(|ban| ban.survives_cleanup_at(now))
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            persistence::write_all(&cfg, &kept).await?;
            debug!(count = removed, "Pruned expired IP bans");
        }

        Ok(removed)
    }
}
