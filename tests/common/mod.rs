//! Integration test common infrastructure.
//!
//! Provides a ban store rooted in a temporary directory, with a fixed id
//! generator and a logger that records what it was told.

#![allow(dead_code)]

use ipbans::{BanLogger, BanStore, BanStoreConfig};
use parking_lot::Mutex;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_ID: &str = "test-uuid";

/// Log level seen by [`RecordingLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Debug,
}

/// Logger that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(Level, String, Option<Value>)>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<(Level, String, Option<Value>)> {
        self.events.lock().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.events.lock().iter().filter(|(l, _, _)| *l == level).count()
    }

    fn push(&self, level: Level, msg: &str, meta: Option<&Value>) {
        self.events
            .lock()
            .push((level, msg.to_string(), meta.cloned()));
    }
}

impl BanLogger for RecordingLogger {
    fn info(&self, msg: &str, meta: Option<&Value>) {
        self.push(Level::Info, msg, meta);
    }

    fn warn(&self, msg: &str, meta: Option<&Value>) {
        self.push(Level::Warn, msg, meta);
    }

    fn error(&self, msg: &str, meta: Option<&Value>) {
        self.push(Level::Error, msg, meta);
    }

    fn debug(&self, msg: &str, meta: Option<&Value>) {
        self.push(Level::Debug, msg, meta);
    }
}

/// A store in its own temp directory.
pub struct TestStore {
    pub dir: TempDir,
    pub store: BanStore,
    pub logger: Arc<RecordingLogger>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let logger = Arc::new(RecordingLogger::default());
        let store = BanStore::new(
            BanStoreConfig::new()
                .with_security_dir(dir.path().join("security"))
                .with_logger(logger.clone())
                .with_id_generator(Arc::new(|| TEST_ID.to_string())),
        );
        Self { dir, store, logger }
    }

    pub fn path(&self) -> PathBuf {
        self.store.ban_file_path()
    }

    /// Write raw content to the ban file, creating the directory.
    pub fn seed(&self, content: &str) {
        let path = self.path();
        std::fs::create_dir_all(path.parent().expect("ban file has a parent"))
            .expect("create security dir");
        std::fs::write(&path, content).expect("seed ban file");
    }

    pub fn seed_json(&self, value: Value) {
        self.seed(&serde_json::to_string(&value).expect("serialize seed"));
    }

    pub fn raw(&self) -> String {
        std::fs::read_to_string(self.path()).expect("read ban file")
    }

    /// The ban file parsed as a JSON array.
    pub fn records(&self) -> Vec<Value> {
        match serde_json::from_str(&self.raw()).expect("ban file is JSON") {
            Value::Array(items) => items,
            other => panic!("ban file is not an array: {other}"),
        }
    }
}
