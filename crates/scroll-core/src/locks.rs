//! Per-collection lock registry
//!
//! Each collection gets one exclusive lock for the lifetime of the driver.
//! The registry mutex only guards the map; it is always released before the
//! returned collection lock is taken, so the two levels never nest.
//!
//! Names are keyed by their cleaned path, so `users`, `users/` and
//! `./users` all share the lock of the one directory they address.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::storage::clean_path;

/// Lock guarding writes to one collection
pub type CollectionLock = Arc<Mutex<()>>;

#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<PathBuf, CollectionLock>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock for `collection`, creating it on first use
    ///
    /// Lookup and insert happen under one registry critical section, so two
    /// callers can never end up holding distinct locks for the same name.
    pub fn get_or_create(&self, collection: &str) -> CollectionLock {
        let key = clean_path(Path::new(collection));
        let mut locks = self.locks.lock();
        locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of collections that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
