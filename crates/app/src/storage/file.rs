//! File-backed storage.

use std::{
    fs, io,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use rustc_hash::FxHashMap;

use crate::storage::{KeyValueStore, StorageError};

/// Single-file JSON document storage.
///
/// The whole document is rewritten on every mutation, so a completed call
/// means the value is on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<FxHashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing document.
    ///
    /// A missing file starts the store empty.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if an existing document cannot be read or
    /// parsed; callers decide whether to discard it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => FxHashMap::default(),
            Err(err) => return Err(StorageError::Io(err)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn write_through(&self, entries: &FxHashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let document = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, document)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.insert(key.to_owned(), value.to_owned());

        self.write_through(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if entries.remove(key).is_none() {
            return Ok(());
        }

        self.write_through(&entries)
    }
}
