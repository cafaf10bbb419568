//! Persistent user state behind an injected key-value store.
//!
//! Favorites, view history and saved quiz answers are JSON values stored
//! under fixed keys. The store itself only knows strings; [`MemoryStore`]
//! keeps them in a map and [`FileStore`] keeps one `.json` file per key.

use camino::{Utf8Path, Utf8PathBuf};
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::sync::{Arc, OnceLock, RwLock};
use thiserror::Error;
use tracing::warn;

mod answers;
mod favorites;
mod history;

pub use answers::{QuizAnswers, QUIZ_ANSWERS_KEY};
pub use favorites::{FavoriteEntry, Favorites, FAVORITE_ENTRIES_KEY, SAVED_RECIPES_KEY};
pub use history::{last_viewed_label, HistoryEntry, ViewHistory, HISTORY_KEY};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode stored value: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to list stored keys: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// String key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.clear();
        Ok(())
    }
}

/// One `{key}.json` file per key under a directory, the key hex-escaped.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Utf8PathBuf,
}

impl FileStore {
    /// Opens the store, creating the directory if needed.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

/// Escapes every byte outside `[A-Za-z0-9-]` as `_XX` hex, so distinct keys
/// always get distinct file names.
fn encode_key(key: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9-]+").unwrap());
    re.replace_all(key, |caps: &Captures| {
        caps[0].bytes().map(|b| format!("_{b:02X}")).collect::<String>()
    })
    .into_owned()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let pattern = self.dir.join("*.json");
        for path in glob::glob(pattern.as_str())?.flatten() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Reads a JSON value, falling back to the default when the key is unset or
/// the stored text does not decode.
pub(crate) fn read_json<S, T>(store: &S, key: &str) -> Result<T, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(key, error = %err, "discarding malformed stored value");
            Ok(T::default())
        }
    }
}

pub(crate) fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    store.set(key, &serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store(dir: &TempDir) -> FileStore {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("state")).unwrap();
        FileStore::new(path).unwrap()
    }

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("saved-recipes").unwrap(), None);

        store.set("saved-recipes", r#"["1","2"]"#).unwrap();
        store.set("recipe-history", "[]").unwrap();
        assert_eq!(
            store.get("saved-recipes").unwrap().as_deref(),
            Some(r#"["1","2"]"#)
        );

        store.remove("saved-recipes").unwrap();
        store.remove("saved-recipes").unwrap();
        assert_eq!(store.get("saved-recipes").unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.get("recipe-history").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);
        exercise(&store);

        store.set("cookwise-quiz-preferences", "{}").unwrap();
        assert!(store.dir().join("cookwise-quiz-preferences.json").is_file());
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("recipe-history"), "recipe-history");
        assert_eq!(encode_key("../etc/passwd"), "_2E_2E_2Fetc_2Fpasswd");
        assert_eq!(encode_key("user_a"), "user_5Fa");
        assert_eq!(encode_key("user a"), "user_20a");
    }

    #[test]
    fn test_file_store_keys_never_share_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store.set("user/a", "one").unwrap();
        store.set("user a", "two").unwrap();
        store.set("user_a", "three").unwrap();

        assert_eq!(store.get("user/a").unwrap().as_deref(), Some("one"));
        assert_eq!(store.get("user a").unwrap().as_deref(), Some("two"));
        assert_eq!(store.get("user_a").unwrap().as_deref(), Some("three"));
    }

    #[test]
    fn test_read_json_defaults() {
        let store = MemoryStore::new();
        let missing: Vec<String> = read_json(&store, "saved-recipes").unwrap();
        assert!(missing.is_empty());

        store.set("saved-recipes", "{broken").unwrap();
        let malformed: Vec<String> = read_json(&store, "saved-recipes").unwrap();
        assert!(malformed.is_empty());

        write_json(&store, "saved-recipes", &["9"]).unwrap();
        let stored: Vec<String> = read_json(&store, "saved-recipes").unwrap();
        assert_eq!(stored, vec!["9".to_string()]);
    }
}
