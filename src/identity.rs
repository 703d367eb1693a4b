//! Anonymous client identity used to tag analysis requests.
//!
//! The backend counts free uses per identifier, so the value is generated once
//! and then reused for as long as the storage survives. It is never rotated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the identifier.
pub const CLIENT_ID_KEY: &str = "tfa_client_id";

/// Errors from the backing store. These never reach callers of
/// [`ClientIdentity::get_or_create`]; they only decide whether the identifier
/// is persisted.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt identity file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Identity store lock poisoned")]
    Poisoned,
}

/// A small string key/value store.
pub trait IdentityStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError>;
    fn set(&self, key: &str, value: &str) -> Result<(), IdentityError>;
}

/// Store backed by a JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, IdentityError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(IdentityError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&contents).map_err(|source| IdentityError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl IdentityStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), IdentityError> {
        let io_err = |source| IdentityError::Io {
            path: self.path.clone(),
            source,
        };

        // Keep unrelated keys; a corrupt file is replaced.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&map).map_err(|source| IdentityError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError> {
        let values = self.values.lock().map_err(|_| IdentityError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), IdentityError> {
        let mut values = self.values.lock().map_err(|_| IdentityError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolves the client identifier against a store.
pub struct ClientIdentity {
    store: Box<dyn IdentityStore>,
    session_id: Mutex<Option<String>>,
}

impl ClientIdentity {
    pub fn new(store: Box<dyn IdentityStore>) -> Self {
        Self {
            store,
            session_id: Mutex::new(None),
        }
    }

    /// Identity persisted in `path`, or in memory when no path is available.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::new(Box::new(FileStore::new(path))),
            None => {
                warn!("No data directory available; client id will not persist");
                Self::new(Box::new(MemoryStore::new()))
            }
        }
    }

    /// Return the stored identifier, generating and storing one if absent.
    ///
    /// Storage failures degrade to an identifier kept for the lifetime of
    /// this value.
    pub fn get_or_create(&self) -> String {
        match self.store.get(CLIENT_ID_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => return id,
            Ok(_) => {}
            Err(e) => warn!("Could not read client id: {}", e),
        }

        let mut session_id = match self.session_id.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(id) = session_id.as_ref() {
            return id.clone();
        }

        let id = generate_client_id();
        match self.store.set(CLIENT_ID_KEY, &id) {
            Ok(()) => debug!("Stored new client id"),
            Err(e) => warn!("Could not persist client id, using it for this session only: {}", e),
        }
        *session_id = Some(id.clone());
        id
    }
}

/// Generate a fresh opaque identifier.
pub fn generate_client_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
