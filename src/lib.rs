//! ipbans - file-backed IP ban list.
//!
//! Keeps banned addresses and string ranges in a JSON file and answers
//! "is this address banned right now" for a request-handling layer.
//!
//! ```no_run
//! use ipbans::{AddBanOptions, BanStore, BanStoreConfig};
//!
//! # async fn demo() -> Result<(), ipbans::BanStoreError> {
//! let store = BanStore::new(BanStoreConfig::new().with_security_dir("/var/lib/app/security"));
//! store.add_ban("203.0.113.7", AddBanOptions::new().reason("spam")).await?;
//! assert!(store.is_banned("203.0.113.7").await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod duration;
pub mod error;
pub mod id;
pub mod logger;
pub mod store;
pub mod telemetry;

pub use config::{BanStoreConfig, ResolvedConfig};
pub use error::{BanStoreError, BanStoreResult};
pub use id::{IdGenerator, UuidGenerator};
pub use logger::{BanLogger, NoopLogger, TracingLogger};
pub use store::{AddBanOptions, BanRecord, BanStore, Expiry};
