//! File-based session store adapter.
//!
//! Stores the session record as a single JSON file named after the storage
//! key, under the client data directory (`~/.splitpay/` by default).
//! Writes land in a temp file first and are renamed into place, so a crash
//! never leaves a half-written record behind.

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::auth::{Session, SESSION_STORAGE_KEY};
use crate::traits::{SessionStore, StoreError};

/// The data directory name under the home directory.
pub const DATA_DIR: &str = ".splitpay";

/// File-based session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store keeping its record under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{}.json", SESSION_STORAGE_KEY)),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn write_record(&self, record: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let mut file = open_private(&temp)?;
        file.write_all(record.as_bytes())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp, &self.path)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::File::create(path)
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read(&self) -> Option<Session> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Session::from_record(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read session record {:?}: {}", self.path, e);
                None
            }
        }
    }

    async fn write(&self, session: &Session) -> Result<(), StoreError> {
        let record = session
            .to_record()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let store = self.clone();
        tokio::task::spawn_blocking(move || store.write_record(&record))
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::ClearFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_uses_storage_key() {
        let store = FileSessionStore::in_dir("/tmp/splitpay-test");
        assert!(store.path().ends_with("splitpay.session.json"));
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(temp_dir.path());
        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(temp_dir.path().join("nested"));
        let session = Session::new("1", "A", "a@x.com");

        store.write(&session).await.unwrap();

        assert_eq!(store.read().await, Some(session));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_write_replaces_whole_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(temp_dir.path());

        store
            .write(&Session::new("1", "A long name", "a-long-address@x.com"))
            .await
            .unwrap();
        store.write(&Session::new("2", "B", "b@x.com")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"id":"2","name":"B","email":"b@x.com"}"#);
    }

    #[tokio::test]
    async fn test_malformed_record_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(temp_dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(temp_dir.path());
        store.write(&Session::new("1", "A", "a@x.com")).await.unwrap();

        store.clear().await.unwrap();
        assert!(store.read().await.is_none());

        // Clearing again is still fine
        store.clear().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_record_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(temp_dir.path());
        store.write(&Session::new("1", "A", "a@x.com")).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
