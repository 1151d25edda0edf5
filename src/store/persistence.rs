//! Persistence functions for the ban file.
//!
//! The whole list is the unit of persistence: it is read in full before
//! every operation and rewritten in full after every mutation.

use super::types::BanRecord;
use crate::config::ResolvedConfig;
use crate::error::BanStoreResult;
use serde_json::{Value, json};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Content written when the file is created or healed.
const EMPTY_LIST: &str = "[]";

/// Make sure the security directory and the ban file exist.
///
/// Any failure to create the directory or stat the file results in an
/// empty list being written. Only that write can fail the call.
pub(super) async fn ensure_storage(cfg: &ResolvedConfig) -> BanStoreResult<()> {
    let path = cfg.ban_file_path();
    let reachable = async {
        fs::create_dir_all(&cfg.security_dir).await?;
        fs::metadata(&path).await?;
        Ok::<_, std::io::Error>(())
    };

    if let Err(e) = reachable.await {
        debug!(path = %path.display(), error = %e, "Ban file not reachable, writing empty list");
        fs::write(&path, EMPTY_LIST).await?;
    }
    Ok(())
}

/// Load the full ban list.
///
/// Unreadable content, invalid JSON, and JSON that is not an array are
/// logged, replaced with an empty list on disk, and reported as empty.
/// Inside an array, elements that are not objects are skipped with a
/// warning; the rest of the list is kept and the file is left untouched.
pub(super) async fn read_all(cfg: &ResolvedConfig) -> BanStoreResult<Vec<BanRecord>> {
    ensure_storage(cfg).await?;
    let path = cfg.ban_file_path();

    match load(&path).await {
        Ok(Value::Array(items)) => {
            let bans = decode_records(cfg, items);
            debug!(path = %path.display(), count = bans.len(), "Ban list loaded");
            Ok(bans)
        }
        Ok(_) => {
            cfg.logger.warn(
                "IP bans file contains invalid data (not an array), resetting to empty array",
                None,
            );
            fs::write(&path, EMPTY_LIST).await?;
            Ok(Vec::new())
        }
        Err(e) => {
            let meta = json!({ "error": e.to_string() });
            cfg.logger.error(
                "Error reading IP bans file, resetting to empty array:",
                Some(&meta),
            );
            fs::write(&path, EMPTY_LIST).await?;
            Ok(Vec::new())
        }
    }
}

/// Failure to get a JSON document out of the ban file.
#[derive(Debug, Error)]
enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

async fn load(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Decode each array element on its own so one bad entry cannot hide the others.
fn decode_records(cfg: &ResolvedConfig, items: Vec<Value>) -> Vec<BanRecord> {
    let mut bans = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let decoded = if item.is_object() {
            serde_json::from_value::<BanRecord>(item).map_err(|e| e.to_string())
        } else {
            Err(format!("expected an object, found {item}"))
        };
        match decoded {
            Ok(ban) => bans.push(ban),
            Err(error) => {
                let meta = json!({ "index": index, "error": error });
                cfg.logger
                    .warn("Skipping unreadable IP ban entry:", Some(&meta));
            }
        }
    }
    bans
}

/// Overwrite the file with the full list, pretty-printed.
pub(super) async fn write_all(cfg: &ResolvedConfig, bans: &[BanRecord]) -> BanStoreResult<()> {
    let path = cfg.ban_file_path();
    let content = serde_json::to_string_pretty(bans)?;
    fs::write(&path, content).await?;

    debug!(path = %path.display(), count = bans.len(), "Ban list saved");
    Ok(())
}
