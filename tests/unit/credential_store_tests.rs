//! Unit tests for the durable credential stores.

use std::sync::Arc;

use pos_console::session::store::{CredentialStore, FileStore, KeyringStore, MemoryStore};
use pos_console::session::SessionManager;

#[test]
fn file_store_missing_file_reads_as_none() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(temp.path().join("token"));
    assert_eq!(store.load().expect("load"), None);
}

#[test]
fn file_store_save_creates_parent_directories() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("dir").join("token");
    let store = FileStore::new(&path);

    store.save("abc").expect("save");

    assert!(path.exists());
    assert_eq!(store.load().expect("load").as_deref(), Some("abc"));
}

#[test]
fn file_store_trims_and_ignores_blank_content() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("token");
    let store = FileStore::new(&path);

    std::fs::write(&path, "  abc\n").expect("write");
    assert_eq!(store.load().expect("load").as_deref(), Some("abc"));

    std::fs::write(&path, "\n\n").expect("write");
    assert_eq!(store.load().expect("load"), None);
}

#[test]
fn file_store_clear_is_idempotent() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(temp.path().join("token"));

    store.save("abc").expect("save");
    store.clear().expect("first clear");
    store.clear().expect("second clear");

    assert_eq!(store.load().expect("load"), None);
    assert!(!store.path().exists());
}

#[cfg(unix)]
#[test]
fn file_store_restricts_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(temp.path().join("token"));
    store.save("abc").expect("save");

    let mode = std::fs::metadata(store.path())
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn file_store_unreadable_path_is_storage_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    // A directory where the file should be cannot be read as text.
    let store = FileStore::new(temp.path());
    let err = store.load().expect_err("directory is not a token file");
    assert!(err.to_string().starts_with("storage:"), "got {err}");
}

#[test]
fn memory_store_round_trip_and_clear() {
    let store = MemoryStore::default();
    assert_eq!(store.load().expect("load"), None);

    store.save("tok").expect("save");
    assert_eq!(store.load().expect("load").as_deref(), Some("tok"));

    store.clear().expect("clear");
    assert_eq!(store.load().expect("load"), None);
}

#[test]
fn memory_store_can_be_seeded() {
    let store = MemoryStore::with_credential("seeded");
    assert_eq!(store.load().expect("load").as_deref(), Some("seeded"));
}

fn scratch_keyring_account(label: &str) -> String {
    format!("{label}-{}", std::process::id())
}

#[test]
#[ignore = "needs an OS keychain (keyutils, Keychain or Credential Manager)"]
fn keyring_store_saved_value_is_read_back() {
    let account = scratch_keyring_account("roundtrip");
    let store = KeyringStore::new("pos-console-tests", &account);

    store.save("abc").expect("save");
    assert_eq!(store.load().expect("load").as_deref(), Some("abc"));

    store.clear().expect("clear");
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
#[ignore = "needs an OS keychain (keyutils, Keychain or Credential Manager)"]
async fn keyring_login_survives_a_fresh_manager() {
    let account = scratch_keyring_account("restart");
    let first = SessionManager::new(Arc::new(KeyringStore::new("pos-console-tests", &account)));
    first.restore().await;
    first.login("abc".into()).await;

    let second = SessionManager::new(Arc::new(KeyringStore::new("pos-console-tests", &account)));
    let restored = second.restore().await;

    assert_eq!(restored.credential(), Some("abc"));
    second.logout().await;
}
