//! Durable key-value storage for small string entries, shaped like a browser's local
//! storage: one file, string keys, string values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const DEFAULT_STORAGE_FILE: &str = "local_storage.json";

/// Raw access to the underlying medium. Errors are reported; [`SettingsStore`]
/// decides what to do with them.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Best-effort facade over a [`StorageBackend`]: reads never fail and writes never
/// propagate errors.
pub struct SettingsStore {
    backend: Box<dyn StorageBackend>,
}

impl SettingsStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Raw stored string for `key`. Backend failures read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "storage read failed, treating entry as absent");
                None
            }
        }
    }

    /// Overwrite `key` with `value`. Failures are logged and dropped.
    pub fn set(&self, key: &str, value: &str) {
        match self.backend.write(key, value) {
            Ok(()) => debug!(key, bytes = value.len(), "storage entry written"),
            Err(err) => warn!(key, error = %err, "storage write failed, value not persisted"),
        }
    }
}

/// Stores every entry in a single JSON object file. Nothing touches the disk until
/// the first read or write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir.into().join(DEFAULT_STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => bail!("{} does not hold a JSON object", self.path.display()),
        }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map().unwrap_or_else(|err| {
            warn!(error = %err, "discarding unreadable storage file");
            Map::new()
        });
        map.insert(key.to_owned(), Value::String(value.to_owned()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory backend. Clones share the same entries, so a caller can keep a handle
/// and observe what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.state.lock().entries.insert(key.into(), value.into());
        backend
    }

    /// Current value of `key`, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.state.lock().entries.get(key).cloned()
    }

    /// Every successful write in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.state.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes.len()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let state = self.state.lock();
        if state.fail_reads {
            bail!("storage is unavailable");
        }
        Ok(state.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            bail!("storage quota exceeded");
        }
        state.entries.insert(key.to_owned(), value.to_owned());
        state.writes.push((key.to_owned(), value.to_owned()));
        Ok(())
    }
}
