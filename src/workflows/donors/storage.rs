//! Key-value persistence boundary for the registry. Reads degrade to "no
//! stored value" on any failure; writes overwrite unconditionally and log
//! instead of propagating errors.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub const DONORS_KEY: &str = "blood_donors";
pub const REQUESTS_KEY: &str = "blood_requests";
pub const INVENTORY_KEY: &str = "blood_inventory";

/// Storage abstraction so the registry can be exercised against an in-memory
/// fake in tests and a JSON file store in production.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Deserialize a stored collection. Missing keys and malformed payloads both
/// come back as None; malformed payloads are logged.
pub fn load_collection<S, T>(storage: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "discarding malformed stored collection");
            None
        }
    }
}

/// Serialize and store a collection under `key`.
pub fn store_collection<S, T>(storage: &S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(err) => warn!(key, %err, "failed to serialize collection"),
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// One JSON file per key under a data directory.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.data_dir) {
            warn!(key, %err, "failed to create data directory");
            return;
        }
        if let Err(err) = fs::write(self.path_for(key), value) {
            warn!(key, %err, "failed to persist collection");
        }
    }
}

/// In-memory fake for tests and ephemeral demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. to simulate an existing installation.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}
