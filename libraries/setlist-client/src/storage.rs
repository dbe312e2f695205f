//! Durable storage for the session token.
//!
//! Components never ask which environment they run in. The storage backend is
//! chosen once at startup: a file-backed store where a session can outlive the
//! process, or [`UnavailableTokenStorage`] where it cannot.

use crate::error::{ClientError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// Fixed key the token is stored under.
pub const TOKEN_KEY: &str = "auth_token";

/// Key/value slot holding the current token.
pub trait TokenStorage: Send + Sync {
    /// Whether tokens written here can be read back.
    fn is_available(&self) -> bool;

    /// Current token, if one is stored.
    fn load(&self) -> Option<String>;

    /// Overwrite the stored token.
    fn store(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Removing an absent token succeeds.
    fn remove(&self) -> Result<()>;
}

/// Storage for contexts where nothing can be persisted.
///
/// Writes are accepted and dropped; reads always come back empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTokenStorage;

impl TokenStorage for UnavailableTokenStorage {
    fn is_available(&self) -> bool {
        false
    }

    fn load(&self) -> Option<String> {
        None
    }

    fn store(&self, _token: &str) -> Result<()> {
        debug!("Token storage unavailable, session will not be kept");
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        Ok(())
    }
}

/// Process-local storage, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn is_available(&self) -> bool {
        true
    }

    fn load(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

/// JSON key/value file on disk, survives restarts.
///
/// Other keys already present in the file are preserved. A file that does not
/// parse reads as empty, and writes to it fail instead of replacing it.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ClientError::Storage(format!("{} is not a valid session file: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn is_available(&self) -> bool {
        true
    }

    fn load(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(TOKEN_KEY),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read session file");
                None
            }
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        // An unreadable file is reported, never overwritten.
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)?;

        debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
            debug!(path = %self.path.display(), "Session token removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_storage_never_returns_a_token() {
        let storage = UnavailableTokenStorage;

        storage.store("abc").unwrap();
        assert!(!storage.is_available());
        assert!(storage.load().is_none());
        storage.remove().unwrap();
    }

    #[test]
    fn memory_storage_overwrites_and_clears() {
        let storage = MemoryTokenStorage::new();

        storage.store("first").unwrap();
        storage.store("second").unwrap();
        assert_eq!(storage.load().as_deref(), Some("second"));

        storage.remove().unwrap();
        storage.remove().unwrap();
        assert!(storage.load().is_none());
    }

    #[test]
    fn file_storage_survives_new_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileTokenStorage::new(&path).store("persisted").unwrap();

        let reopened = FileTokenStorage::new(&path);
        assert_eq!(reopened.load().as_deref(), Some("persisted"));
    }

    #[test]
    fn file_storage_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let storage = FileTokenStorage::new(&path);
        storage.store("tok").unwrap();
        storage.remove().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("theme"));
        assert!(!contents.contains(TOKEN_KEY));
    }

    #[test]
    fn removing_from_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("absent.json"));

        storage.remove().unwrap();
        assert!(storage.load().is_none());
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_reads_as_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileTokenStorage::new(&path).load().is_none());
    }

    #[test]
    fn corrupt_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"theme":"dark""#).unwrap();

        let storage = FileTokenStorage::new(&path);

        assert!(matches!(storage.store("t"), Err(ClientError::Storage(_))));
        assert!(matches!(storage.remove(), Err(ClientError::Storage(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"theme":"dark""#);
    }
}
