// In-process record store
// Author: kelexine (https://github.com/kelexine)

use super::Store;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Records held in a `HashMap` behind a read-write lock.
#[derive(Debug)]
pub struct MemoryStore<V> {
    records: RwLock<HashMap<String, V>>,
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> Store<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.records.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: V) {
        self.records.write().insert(key.to_string(), value);
    }

    fn prune(&self, keep: &dyn Fn(&V) -> bool) {
        self.records.write().retain(|_, value| keep(value));
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
