//! Keyed record storage shared by the response cache and the rate limiter.
//!
//! Both callers only need four operations, so the storage medium is a
//! pluggable backend behind [`Store`]:
//!
//! - [`MemoryStore`]: a locked `HashMap`, for single-instance deployments.
//! - [`FileStore`]: a JSON object on disk, re-read on every access so that
//!   several processes on one host see each other's writes.
//!
//! Backends never fail the caller. Storage problems are logged and degrade to
//! "not found" on read and to a dropped write on put; a cold store is always a
//! valid state.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::StoreBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A string-keyed map of records.
pub trait Store<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    /// Insert or overwrite the record under `key`.
    fn put(&self, key: &str, value: V);

    /// Drop every record for which `keep` returns false.
    fn prune(&self, keep: &dyn Fn(&V) -> bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the backend selected in config.
pub fn open<V>(backend: StoreBackend, file_path: &str) -> Arc<dyn Store<V>>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::<V>::new()),
        StoreBackend::File => Arc::new(FileStore::<V>::new(file_path)),
    }
}
