//! Durable JSON key-value storage.
//!
//! [`Store`] is the async face of [`Database`]: every call opens a
//! connection on the blocking pool, so the store itself is just a path and is
//! cheap to clone.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use tokio::task;

use crate::{
    db::Database,
    error::{MapperError, Result},
};

/// Key of the live step sequence.
pub const STEPS_KEY: &str = "journeyMapper_steps";
/// Key of the live context string.
pub const CONTEXT_KEY: &str = "journeyMapper_context";
/// Key of the saved project list.
pub const PROJECTS_KEY: &str = "journeyMapper_projects";
/// Key of the stored credentials.
pub const CREDENTIALS_KEY: &str = "ai_credentials";

/// Handle to the key-value database.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::FileSystem` if the parent directory cannot be
    /// created, or `MapperError::Database` if schema initialization fails.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MapperError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), MapperError>(())
        })
        .await
        .map_err(MapperError::join)??;

        Ok(Self { db_path })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Reads the raw value under `key`.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_value(&key)
        })
        .await
        .map_err(MapperError::join)?
    }

    /// Decodes the JSON value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Storage` if the stored value is not valid JSON
    /// for `T`.
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| MapperError::Storage {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Like [`Store::load_json`], but a corrupt entry is removed and treated
    /// as absent.
    pub async fn load_json_or_discard<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.load_json(key).await {
            Err(MapperError::Storage { key, message }) => {
                warn!("Discarding corrupt entry '{key}': {message}");
                self.remove(&key).await?;
                Ok(None)
            }
            other => other,
        }
    }

    /// Encodes `value` as JSON and stores it under `key`.
    pub async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, raw).await
    }

    /// Stores a raw value under `key`.
    pub async fn put_raw(&self, key: &str, value: String) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_value(&key, &value)
        })
        .await
        .map_err(MapperError::join)?
    }

    /// Stores several already-encoded values atomically.
    pub async fn put_many(&self, entries: Vec<(&'static str, String)>) -> Result<()> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_values(&entries)
        })
        .await
        .map_err(MapperError::join)?
    }

    /// Removes the value under `key`.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.remove_value(&key)
        })
        .await
        .map_err(MapperError::join)?
    }

    /// Lists the stored keys.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.keys()
        })
        .await
        .map_err(MapperError::join)?
    }
}
