//! Identity-keyed memoization for selector results.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::trace;

use crate::errors::{Error, Result};

/// An input whose identity decides whether cached results are still valid.
pub trait Snapshot: Clone {
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Snapshot for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<A: Snapshot, B: Snapshot> Snapshot for (A, B) {
    fn is_same(&self, other: &Self) -> bool {
        self.0.is_same(&other.0) && self.1.is_same(&other.1)
    }
}

/// Hit and miss counters of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl std::ops::Add for MemoStats {
    type Output = MemoStats;

    fn add(self, other: MemoStats) -> MemoStats {
        MemoStats {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            entries: self.entries + other.entries,
        }
    }
}

struct MemoState<S, K, V> {
    source: Option<S>,
    entries: HashMap<K, V>,
}

/// Caches values computed from a source snapshot, per argument key.
///
/// Entries live until the source changes identity. Holding the source keeps
/// the snapshot alive, so a reallocated snapshot can never alias a stale one.
/// Errors are returned to the caller and never cached.
pub struct MemoCache<S, K, V> {
    name: &'static str,
    state: RwLock<MemoState<S, K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S, K, V> MemoCache<S, K, V>
where
    S: Snapshot,
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(MemoState {
                source: None,
                entries: HashMap::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key` if it was computed from `source`,
    /// otherwise runs `compute` and caches its result.
    pub fn get_or_compute<F>(&self, source: &S, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        {
            let state = self
                .state
                .read()
                .map_err(|e| Error::Cache(e.to_string()))?;
            if state.source.as_ref().is_some_and(|s| s.is_same(source)) {
                if let Some(value) = state.entries.get(&key) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    trace!("{} cache hit", self.name);
                    return Ok(value.clone());
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("{} cache miss", self.name);
        let value = compute()?;

        let mut state = self
            .state
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?;
        if !state.source.as_ref().is_some_and(|s| s.is_same(source)) {
            state.entries.clear();
            state.source = Some(source.clone());
        }
        state.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Drops every entry and the retained source.
    pub fn clear(&self) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?;
        state.entries.clear();
        state.source = None;
        Ok(())
    }

    pub fn stats(&self) -> MemoStats {
        let entries = self
            .state
            .read()
            .map(|state| state.entries.len())
            .unwrap_or_default();
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}
