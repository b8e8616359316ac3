//! Persistent slot for the bearer token, the terminal counterpart of browser
//! local storage. Only the session context and the unauthorized callback it
//! installs write to the store; the bearer middleware only reads it.

use super::errors::AppError;
use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

pub const ENV_TOKEN_FILE: &str = "SMARTCLAIM_TOKEN_FILE";
const TOKEN_FILE_NAME: &str = "session.json";

pub trait TokenStore: Send + Sync {
    /// Returns the persisted token, if any.
    ///
    /// # Errors
    /// Returns `AppError::Storage` when the backing slot cannot be read.
    fn load(&self) -> Result<Option<SecretString>, AppError>;

    /// Replaces the persisted token.
    ///
    /// # Errors
    /// Returns `AppError::Storage` when the backing slot cannot be written.
    fn save(&self, token: &SecretString) -> Result<(), AppError>;

    /// Removes the persisted token; clearing an empty slot is not an error.
    ///
    /// # Errors
    /// Returns `AppError::Storage` when the backing slot cannot be removed.
    fn clear(&self) -> Result<(), AppError>;
}

#[derive(Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
}

/// Token store backed by a JSON file with owner-only permissions.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform config location, e.g. `~/.config/smartclaim/session.json`.
    ///
    /// # Errors
    /// Returns `AppError::Config` when no home directory can be determined.
    pub fn default_path() -> Result<PathBuf, AppError> {
        let dirs = ProjectDirs::from("ai", "smartclaim", "smartclaim").ok_or_else(|| {
            AppError::Config("Could not determine platform config directory.".to_string())
        })?;
        Ok(dirs.config_dir().join(TOKEN_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecretString>, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                )))
            }
        };

        // A corrupt file is treated as an empty slot.
        let Ok(stored) = serde_json::from_str::<StoredToken>(&content) else {
            debug!("ignoring unreadable token file {}", self.path.display());
            return Ok(None);
        };

        if stored.access_token.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(SecretString::from(stored.access_token)))
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    AppError::Storage(format!("Failed to create {}: {err}", parent.display()))
                })?;
            }
        }

        let payload = serde_json::to_string(&StoredToken {
            access_token: token.expose_secret().to_string(),
        })
        .map_err(|err| AppError::Serialization(format!("Failed to encode token: {err}")))?;

        let write_error = |err: std::io::Error| {
            AppError::Storage(format!("Failed to write {}: {err}", self.path.display()))
        };
        let mut file = open_private(&self.path).map_err(write_error)?;
        // An existing file keeps its old mode until restricted again.
        restrict_permissions(&self.path)?;
        file.write_all(payload.as_bytes()).map_err(write_error)
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to remove {}: {err}",
                self.path.display()
            ))),
        }
    }
}

/// Opens the token file for writing, created owner-only from the start.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|err| {
        AppError::Storage(format!(
            "Failed to set permissions on {}: {err}",
            path.display()
        ))
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AppError> {
    Ok(())
}

/// In-memory token store, used by tests and short-lived embeddings.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(SecretString::from(token.to_string()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecretString>, AppError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| AppError::Storage("Token store lock poisoned.".to_string()))
    }

    fn save(&self, token: &SecretString) -> Result<(), AppError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Storage("Token store lock poisoned.".to_string()))?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Storage("Token store lock poisoned.".to_string()))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join(TOKEN_FILE_NAME));

        assert!(store.load().unwrap().is_none());

        store.save(&SecretString::from("abc.def".to_string())).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.expose_secret(), "abc.def");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join(TOKEN_FILE_NAME));
        store.save(&SecretString::from("secret".to_string())).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_world_readable_file_is_tightened_on_save() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        fs::write(&path, r#"{"access_token":"old-token-value"}"#).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.save(&SecretString::from("new".to_string())).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "new");
    }

    #[test]
    fn corrupt_or_blank_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);

        fs::write(&path, "not json").unwrap();
        assert!(FileTokenStore::new(&path).load().unwrap().is_none());

        fs::write(&path, r#"{"access_token":"   "}"#).unwrap();
        assert!(FileTokenStore::new(&path).load().unwrap().is_none());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryTokenStore::with_token("t0");
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "t0");

        store.save(&SecretString::from("t1".to_string())).unwrap();
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "t1");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
