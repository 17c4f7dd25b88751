//! ConfigStore - Local Key-Value Storage
//!
//! One JSON document per key, stored as `<key>.json` under a directory.
//! Values are handed back as raw text so callers decide how to treat a
//! document they cannot parse.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::helpers::get_or_create_data_dir;

/// Persistent string storage keyed by name
pub trait KeyValueStore: Send + Sync {
    /// Raw stored text, `None` when the key was never written
    fn load_key(&self, key: &str) -> Result<Option<String>>;

    /// Replace the stored text for `key`
    fn save_key(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store under the per-user data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::in_dir(get_or_create_data_dir()?))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Invalid {
                message: format!("Storage key '{}' is not a plain name", key),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for ConfigStore {
    fn load_key(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn save_key(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        // Replace atomically
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Volatile store, for runs that must not touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load_key(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save_key(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::in_dir(dir.path());
        assert_eq!(store.load_key("terra_watchers_settings").expect("load"), None);
    }

    #[test]
    fn save_then_load_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::in_dir(dir.path().join("nested"));

        store.save_key("k", "first").expect("save");
        store.save_key("k", "second").expect("save");
        assert_eq!(store.load_key("k").expect("load").as_deref(), Some("second"));
        assert!(!dir.path().join("nested").join("k.json.tmp").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::in_dir(dir.path());
        assert!(store.save_key("../escape", "x").is_err());
        assert!(store.load_key("").is_err());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load_key("a").expect("load"), None);
        store.save_key("a", "1").expect("save");
        assert_eq!(store.load_key("a").expect("load").as_deref(), Some("1"));
    }
}
