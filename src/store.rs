//! Local Store
//!
//! Persisted client state: the auth token and the serialized user object.
//! Everything else the client knows lives only as long as a page does.
//!
//! Stored as a small JSON file (default: `<data dir>/moodmate/state.json`).
//! A missing file is an empty store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const STORE_DIR: &str = "moodmate";
const STORE_FILE: &str = "state.json";

/// Errors from reading or writing the store file
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Corrupt store {path:?}: {error}")]
    Parse {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("Could not determine data directory")]
    NoDataDir,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The two persisted keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

/// File-backed store for [`StoredState`]
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    state: StoredState,
}

impl LocalStore {
    /// Default store location in the platform data directory
    pub fn default_path() -> StoreResult<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(STORE_DIR).join(STORE_FILE))
            .ok_or(StoreError::NoDataDir)
    }

    /// Open the store at `path`, reading it if it exists
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let state = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|error| StoreError::Io {
                path: path.clone(),
                error,
            })?;
            if content.trim().is_empty() {
                StoredState::default()
            } else {
                serde_json::from_str(&content).map_err(|error| StoreError::Parse {
                    path: path.clone(),
                    error,
                })?
            }
        } else {
            StoredState::default()
        };

        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn user(&self) -> Option<&serde_json::Value> {
        self.state.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.token.is_some()
    }

    /// Persist a fresh login
    pub fn set_login(&mut self, token: String, user: serde_json::Value) -> StoreResult<()> {
        self.state.token = Some(token);
        self.state.user = if user.is_null() { None } else { Some(user) };
        self.save()
    }

    /// Remove both keys
    pub fn clear(&mut self) -> StoreResult<()> {
        self.state = StoredState::default();
        self.save()
    }

    fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| StoreError::Io {
                path: parent.to_path_buf(),
                error,
            })?;
        }

        let content = serde_json::to_string_pretty(&self.state).map_err(|error| StoreError::Parse {
            path: self.path.clone(),
            error,
        })?;

        std::fs::write(&self.path, content).map_err(|error| StoreError::Io {
            path: self.path.clone(),
            error,
        })?;

        tracing::debug!(path = ?self.path, logged_in = self.is_logged_in(), "Saved local store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path().join("state.json")).unwrap();
        assert!(!store.is_logged_in());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_login_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = LocalStore::open(&path).unwrap();
        store
            .set_login("tok-1".to_string(), json!({"id": 1, "username": "lin"}))
            .unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.token(), Some("tok-1"));
        assert_eq!(reopened.user().unwrap()["username"], "lin");
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut store = LocalStore::open(&path).unwrap();
        store.set_login("tok".to_string(), json!({"id": 2})).unwrap();
        store.clear().unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.token(), None);
        assert_eq!(reopened.user(), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = LocalStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
