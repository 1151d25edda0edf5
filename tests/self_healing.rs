//! Storage initialisation, self-healing reads, and failure policy.

use ipbans::{AddBanOptions, BanStore, BanStoreConfig};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{Level, RecordingLogger, TestStore};

#[tokio::test]
async fn first_read_creates_directory_and_file() {
    let t = TestStore::new();
    assert!(!t.path().exists());

    assert!(t.store.list_active_bans().await.unwrap().is_empty());

    assert!(t.path().exists());
    assert_eq!(t.raw(), "[]");
}

#[tokio::test]
async fn existing_file_is_not_recreated() {
    let t = TestStore::new();
    let seeded = serde_json::to_string(&json!([
        { "id": "1", "ip_address": "1.2.3.4", "is_active": true, "banned_at": "2024-01-01" }
    ]))
    .unwrap();
    t.seed(&seeded);

    assert_eq!(t.store.list_active_bans().await.unwrap().len(), 1);
    assert_eq!(t.raw(), seeded);
}

#[tokio::test]
async fn corrupt_json_resets_to_empty() {
    let t = TestStore::new();
    t.seed("not json at all");

    assert!(t.store.list_active_bans().await.unwrap().is_empty());
    assert_eq!(t.raw(), "[]");

    let events = t.logger.events();
    assert_eq!(events.len(), 1);
    let (level, msg, meta) = &events[0];
    assert_eq!(*level, Level::Error);
    assert!(msg.starts_with("Error reading IP bans file"));
    assert!(meta.as_ref().unwrap()["error"].is_string());
}

#[tokio::test]
async fn non_array_json_resets_to_empty() {
    let t = TestStore::new();
    t.seed(r#"{"not": "array"}"#);

    assert!(t.store.list_active_bans().await.unwrap().is_empty());
    assert_eq!(t.raw(), "[]");
    assert_eq!(t.logger.count(Level::Warn), 1);
    assert_eq!(t.logger.count(Level::Error), 0);
}

#[tokio::test]
async fn mistyped_fields_keep_neighbours() {
    let t = TestStore::new();
    let seeded = serde_json::to_string(&json!([
        { "id": "1", "ip_address": "1.2.3.4", "is_active": true, "banned_at": "2024-01-01" },
        { "id": 7, "ip_address": "5.6.7.8", "is_active": "yes", "banned_at": "2024-01-01" }
    ]))
    .unwrap();
    t.seed(&seeded);

    assert!(t.store.is_banned("1.2.3.4").await);
    assert!(t.store.is_banned("5.6.7.8").await);

    let active = t.store.list_active_bans().await.unwrap();
    assert_eq!(active.len(), 2);
    assert_eq!(active[1].id, "7");

    assert_eq!(t.raw(), seeded);
    assert_eq!(t.logger.count(Level::Error), 0);
    assert_eq!(t.logger.count(Level::Warn), 0);
}

#[tokio::test]
async fn non_object_entries_are_skipped() {
    let t = TestStore::new();
    let seeded = serde_json::to_string(&json!([
        "1.2.3.4",
        { "id": "2", "ip_address": "5.6.7.8", "is_active": true, "banned_at": "2024-01-01" }
    ]))
    .unwrap();
    t.seed(&seeded);

    assert!(!t.store.is_banned("1.2.3.4").await);
    assert!(t.store.is_banned("5.6.7.8").await);
    assert_eq!(t.raw(), seeded);

    let warnings: Vec<_> = t
        .logger
        .events()
        .into_iter()
        .filter(|(level, _, _)| *level == Level::Warn)
        .collect();
    assert_eq!(warnings.len(), 2);
    let (_, msg, meta) = &warnings[0];
    assert_eq!(msg, "Skipping unreadable IP ban entry:");
    assert_eq!(meta.as_ref().unwrap()["index"], 0);
    assert_eq!(t.logger.count(Level::Error), 0);
}

#[tokio::test]
async fn skipped_entries_are_dropped_on_next_write() {
    let t = TestStore::new();
    t.seed_json(json!([
        42,
        { "id": "2", "ip_address": "5.6.7.8", "is_active": true, "banned_at": "2024-01-01" }
    ]));

    t.store.add_ban("1.2.3.4", AddBanOptions::new()).await.unwrap();

    let records = t.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["ip_address"], "5.6.7.8");
    assert_eq!(records[1]["ip_address"], "1.2.3.4");
}

#[tokio::test]
async fn corrupt_store_heals_before_mutation() {
    let t = TestStore::new();
    t.seed("{{{{");

    t.store.add_ban("1.2.3.4", AddBanOptions::new()).await.unwrap();

    let records = t.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["ip_address"], "1.2.3.4");
}

/// A security dir that can never be created: its parent is a regular file.
fn unwritable_store(logger: Arc<RecordingLogger>) -> (tempfile::TempDir, BanStore) {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "plain file").unwrap();

    let store = BanStore::new(
        BanStoreConfig::new()
            .with_security_dir(blocker.join("security"))
            .with_logger(logger),
    );
    (dir, store)
}

#[tokio::test]
async fn is_banned_fails_open() {
    let logger = Arc::new(RecordingLogger::default());
    let (_dir, store) = unwritable_store(logger.clone());

    assert!(!store.is_banned("1.2.3.4").await);

    let events = logger.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, Level::Error);
    assert_eq!(events[0].1, "Error checking IP ban:");
}

#[tokio::test]
async fn mutations_surface_errors() {
    let logger = Arc::new(RecordingLogger::default());
    let (_dir, store) = unwritable_store(logger);

    assert!(store.add_ban("1.2.3.4", AddBanOptions::new()).await.is_err());
    assert!(store.remove_ban("1.2.3.4").await.is_err());
    assert!(store.deactivate_ban("1.2.3.4").await.is_err());
    assert!(store.cleanup_expired_bans().await.is_err());
    assert!(store.list_active_bans().await.is_err());
}

#[tokio::test]
async fn reconfigure_switches_files() {
    let mut t = TestStore::new();
    t.store.add_ban("1.2.3.4", AddBanOptions::new()).await.unwrap();

    t.store
        .configure(BanStoreConfig::new().with_ban_file_name("other.json"));
    assert!(t.store.ban_file_path().ends_with("security/other.json"));
    assert!(!t.store.is_banned("1.2.3.4").await);

    t.store
        .configure(BanStoreConfig::new().with_ban_file_name("ip-bans.json"));
    assert!(t.store.is_banned("1.2.3.4").await);
}
