//! Process-lifetime memoization of loaded datasets.
//!
//! Loading is the only operation in the pipeline worth caching; everything
//! downstream recomputes per interaction. Lifecycle is explicit
//! (`invalidate`, `clear`) so tests can reset state between runs instead of
//! fighting hidden module-level globals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::error::Result;
use crate::loader::DataLoader;

/// Caches one loaded [`DataLoader`] per source path.
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<DataLoader>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached loader for `path`, or run `load` and cache its
    /// result. The map lock is held across the load, so two concurrent first
    /// requests for the same process resolve to a single load (single-flight)
    /// rather than duplicating the I/O.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Result<Arc<DataLoader>>
    where
        F: FnOnce() -> Result<DataLoader>,
    {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = entries.get(path) {
            debug!(path = %path.display(), "dataset cache hit");
            return Ok(Arc::clone(hit));
        }
        let loaded = Arc::new(load()?);
        entries.insert(path.to_path_buf(), Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drop the cached entry for `path`. Returns whether one existed. The
    /// next `get_or_load` reloads from the source.
    pub fn invalidate(&self, path: &Path) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(path).is_some()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
