use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::error::LoadError;
use crate::data::loader::load_series;
use crate::models::timeseries::OhlcvSeries;

/// Memoized series loads, keyed by path.
///
/// Owned by whoever composes the app; there is no global instance. Entries
/// live until `invalidate`/`clear` is called. Failed loads are not cached.
#[derive(Default)]
pub struct SeriesCache {
    entries: HashMap<PathBuf, Arc<OhlcvSeries>>,
    hits: usize,
    misses: usize,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<OhlcvSeries>, LoadError> {
        self.get_or_load_with(path, load_series)
    }

    /// Same as `get_or_load` with a custom loader (used by tests).
    pub fn get_or_load_with<F>(
        &mut self,
        path: &Path,
        loader: F,
    ) -> Result<Arc<OhlcvSeries>, LoadError>
    where
        F: FnOnce(&Path) -> Result<OhlcvSeries, LoadError>,
    {
        if let Some(series) = self.entries.get(path) {
            self.hits += 1;
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_cache_events {
                log::info!("[cache] hit for {:?}", path);
            }
            return Ok(Arc::clone(series));
        }

        self.misses += 1;
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_cache_events {
            log::info!("[cache] miss for {:?}, loading", path);
        }

        let series = Arc::new(loader(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&series));
        Ok(series)
    }

    /// Drops the entry for `path`; returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    pub fn cache_misses(&self) -> usize {
        self.misses
    }
}
