//! Key-value persistence for high scores and sound preferences.
//!
//! Values are stored as strings, typed helpers parse on the way out. A value that
//! fails to parse reads as missing.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn set_u32(&mut self, key: &str, value: u32) -> Result<()> {
        self.set(key, &value.to_string())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }

    fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key)
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
    }

    fn set_f32(&mut self, key: &str, value: f32) -> Result<()> {
        self.set(key, &value.to_string())
    }
}

/// In-process store, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Load `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("parsing store {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("reading store {}", path.display()))
            }
        };

        log::debug!("opened store {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating store directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing store {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SNAKE_HIGH_SCORE_KEY, SOUND_ENABLED_KEY, SOUND_VOLUME_KEY};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tui-arcade-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_typed_helpers() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_u32(SNAKE_HIGH_SCORE_KEY), None);

        store.set_u32(SNAKE_HIGH_SCORE_KEY, 120).unwrap();
        store.set_bool(SOUND_ENABLED_KEY, false).unwrap();
        store.set_f32(SOUND_VOLUME_KEY, 0.25).unwrap();

        assert_eq!(store.get_u32(SNAKE_HIGH_SCORE_KEY), Some(120));
        assert_eq!(store.get_bool(SOUND_ENABLED_KEY), Some(false));
        assert_eq!(store.get_f32(SOUND_VOLUME_KEY), Some(0.25));
    }

    #[test]
    fn test_unparseable_values_read_as_missing() {
        let mut store = MemoryStore::new();
        store.set(SNAKE_HIGH_SCORE_KEY, "lots").unwrap();
        store.set(SOUND_VOLUME_KEY, "NaN").unwrap();
        assert_eq!(store.get_u32(SNAKE_HIGH_SCORE_KEY), None);
        assert_eq!(store.get_f32(SOUND_VOLUME_KEY), None);
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(SNAKE_HIGH_SCORE_KEY), None);
        store.set_u32(SNAKE_HIGH_SCORE_KEY, 340).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_u32(SNAKE_HIGH_SCORE_KEY), Some(340));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json_file_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        assert!(JsonFileStore::open(&path).is_err());
        fs::remove_file(&path).unwrap();
    }
}
