use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use striena_core::{KeyValueStore, StoreError};

const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorePayload {
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Key/value store persisted as a pretty-printed JSON document.
///
/// Writes stay in memory until [`KeyValueStore::flush`], which rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }
        let body = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let payload: StorePayload =
            serde_json::from_str(&body).with_context(|| format!("parse {}", path.display()))?;
        if payload.version != STORE_SCHEMA_VERSION {
            bail!(
                "unsupported store version {} in {} (expected {})",
                payload.version,
                path.display(),
                STORE_SCHEMA_VERSION
            );
        }
        Ok(Self {
            path,
            values: payload.values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StoreError::Io(err.to_string()))?;
            }
        }
        let payload = StorePayload {
            version: STORE_SCHEMA_VERSION,
            values: self.values.clone(),
        };
        let body = serde_json::to_string_pretty(&payload)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;
        fs::write(&self.path, body).map_err(|err| StoreError::Io(err.to_string()))
    }
}

/// `STRIENA_SAVE` when set, otherwise a dotfile in the home directory.
pub fn default_store_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("STRIENA_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".striena_endings.json"))
}
