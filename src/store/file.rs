// File-backed record store
// Author: kelexine (https://github.com/kelexine)

use super::Store;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Records kept as a single JSON object in a file.
///
/// The file is read on every call, so processes sharing it converge, but
/// read-modify-write cycles are only serialized within this process.
#[derive(Debug)]
pub struct FileStore<V> {
    path: PathBuf,
    io_lock: Mutex<()>,
    _marker: PhantomData<fn() -> V>,
}

impl<V> FileStore<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            io_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Missing, unreadable or corrupt files all load as an empty map.
    fn load(&self) -> HashMap<String, V> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Failed to read store {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };

        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            warn!("Ignoring corrupt store {}: {}", self.path.display(), e);
            HashMap::new()
        })
    }

    fn save(&self, records: &HashMap<String, V>) {
        let result = serde_json::to_vec(records)
            .map_err(std::io::Error::from)
            .and_then(|bytes| std::fs::write(&self.path, bytes));

        match result {
            Ok(()) => debug!("Saved {} records to {}", records.len(), self.path.display()),
            Err(e) => warn!("Failed to write store {}: {}", self.path.display(), e),
        }
    }
}

impl<V> Store<V> for FileStore<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let _guard = self.io_lock.lock();
        self.load().remove(key)
    }

    fn put(&self, key: &str, value: V) {
        let _guard = self.io_lock.lock();
        let mut records = self.load();
        records.insert(key.to_string(), value);
        self.save(&records);
    }

    fn prune(&self, keep: &dyn Fn(&V) -> bool) {
        let _guard = self.io_lock.lock();
        let mut records = self.load();
        let before = records.len();
        records.retain(|_, value| keep(value));
        if records.len() != before {
            self.save(&records);
        }
    }

    fn len(&self) -> usize {
        let _guard = self.io_lock.lock();
        self.load().len()
    }
}
