//! # Key-Value Backends
//!
//! The invoice is stored as string values under string keys, the same shape
//! as browser local storage. Two backends:
//!
//! - [`MemoryStore`] - a `HashMap`, for tests and ephemeral sessions
//! - [`FileStore`] - one JSON object file on disk
//!
//! ## File Layout
//! ```text
//! invoice.json
//! {
//!   "invoice-line-items": "[{\"id\":\"item-1\",\"service\":\"...\",...}]",
//!   "invoice-tax-rate": "0.08"
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// An opaque string key-value store.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Sets the value under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> StoreResult<()>;
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-seeded with entries (e.g. to simulate corrupt data).
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Store backed by a single JSON object file.
///
/// ## Behavior
/// - Missing file reads as an empty store
/// - Writes go to a temp file that is renamed over the original, so a crash
///   mid-write leaves the previous contents intact
/// - A corrupt file fails reads with [`StoreError::Corrupt`]; the next write
///   replaces it
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at `path`. Nothing is touched until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StoreResult<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt {
            location: self.path.display().to_string(),
            reason: err.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Serialize {
            what: "store entries".to_string(),
            source,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), keys = entries.len(), "Store file written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err @ StoreError::Corrupt { .. }) => {
                warn!(error = %err, "Replacing corrupt store file");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };

        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
