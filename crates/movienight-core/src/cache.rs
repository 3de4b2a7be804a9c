//! Session-wide cache of server responses.
//!
//! Entries are addressed by [`QueryKey`] (resource plus exact parameters).
//! Mutations invalidate entries instead of patching them; the next read
//! refetches. Each entry carries a generation that invalidation bumps, so a
//! fetch that was already in flight cannot store pre-mutation data as fresh.

use movienight_models::SearchMode;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

/// Refetch attempts when invalidations keep racing a fetch
const MAX_FETCH_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Users,
    RotationNext,
    Watchlog { limit: u32 },
    Search { query: String, mode: SearchMode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Rotation,
    Watchlog,
    Search,
}

impl QueryKey {
    pub fn resource(&self) -> Resource {
        match self {
            QueryKey::Users => Resource::Users,
            QueryKey::RotationNext => Resource::Rotation,
            QueryKey::Watchlog { .. } => Resource::Watchlog,
            QueryKey::Search { .. } => Resource::Search,
        }
    }
}

/// A cached value and whether it has been invalidated since it was stored
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub stale: bool,
}

struct Entry {
    data: Option<Arc<dyn Any + Send + Sync>>,
    stale: bool,
    generation: u64,
}

impl Entry {
    fn empty() -> Self {
        Self {
            data: None,
            stale: true,
            generation: 0,
        }
    }
}

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        // A panic while holding the lock cannot leave an entry half-written
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached value for `key`, including stale ones
    pub fn get<T>(&self, key: &QueryKey) -> Option<Cached<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = self.lock();
        let entry = entries.get(key)?;
        let value = entry.data.as_ref()?.downcast_ref::<T>()?.clone();
        Some(Cached {
            value,
            stale: entry.stale,
        })
    }

    /// Fresh value for `key`, if any
    pub fn get_fresh<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.get::<T>(key).filter(|c| !c.stale).map(|c| c.value)
    }

    pub fn set<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert_with(Entry::empty);
        entry.data = Some(Arc::new(value));
        entry.stale = false;
    }

    /// Mark `key` stale. Safe to call for keys that were never fetched.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::empty);
        entry.stale = true;
        entry.generation += 1;
        trace!(?key, generation = entry.generation, "Invalidated cache entry");
    }

    /// Mark every key of `resource` stale, whatever its parameters
    pub fn invalidate_resource(&self, resource: Resource) {
        let mut entries = self.lock();
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.resource() == resource {
                entry.stale = true;
                entry.generation += 1;
                count += 1;
            }
        }
        debug!(?resource, count, "Invalidated cached queries");
    }

    /// Edit the cached value in place. Returns false when nothing of type `T`
    /// is cached under `key`. Staleness is left as it was.
    pub fn mutate<T, F>(&self, key: &QueryKey, f: F) -> bool
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&mut T),
    {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return false;
        };
        let Some(mut value) = entry
            .data
            .as_ref()
            .and_then(|data| data.downcast_ref::<T>())
            .cloned()
        else {
            return false;
        };
        f(&mut value);
        entry.data = Some(Arc::new(value));
        true
    }

    fn generation(&self, key: &QueryKey) -> u64 {
        let mut entries = self.lock();
        entries.entry(key.clone()).or_insert_with(Entry::empty).generation
    }

    /// Store `value` only if `key` was not invalidated since `generation`
    fn complete<T>(&self, key: &QueryKey, generation: u64, value: T) -> bool
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::empty);
        if entry.generation != generation {
            return false;
        }
        entry.data = Some(Arc::new(value));
        entry.stale = false;
        true
    }

    /// Return the fresh value for `key` or load it.
    ///
    /// If the key is invalidated while the load is in flight, the result is
    /// discarded and the load repeated, so callers never get data older than
    /// the latest invalidation.
    pub async fn fetch<T, E, F, Fut>(&self, key: QueryKey, mut loader: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get_fresh::<T>(&key) {
            trace!(?key, "Cache hit");
            return Ok(value);
        }

        let mut attempt = 1;
        loop {
            let generation = self.generation(&key);
            debug!(?key, attempt, "Cache miss, loading");
            let value = loader().await?;

            if self.complete(&key, generation, value.clone()) {
                return Ok(value);
            }

            if attempt >= MAX_FETCH_ATTEMPTS {
                warn!(?key, "Query kept being invalidated while loading, returning uncached result");
                return Ok(value);
            }
            debug!(?key, "Invalidated while loading, refetching");
            attempt += 1;
        }
    }
}
