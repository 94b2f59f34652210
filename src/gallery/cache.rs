//! Time-bounded memoizer for derived views.
//!
//! Entries expire lazily: an entry older than the TTL is dropped the next
//! time it is read. There is no background sweep and no capacity bound; the
//! key space is one entry per filter per derivation.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default lifetime of a cached derivation
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

#[derive(Debug, Clone)]
pub struct DerivationCache<V> {
    ttl: Duration,
    entries: HashMap<String, Entry<V>>,
}

impl<V: Clone> DerivationCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Read `key` as of `now`, evicting it if it has outlived the TTL.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;

        if now.saturating_duration_since(entry.stored_at) > self.ttl {
            trace!(key, "cache entry expired");
            self.entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.set_at(key, value, Instant::now());
    }

    pub fn set_at(&mut self, key: impl Into<String>, value: V, now: Instant) {
        self.entries.insert(
            key.into(),
            Entry {
                value,
                stored_at: now,
            },
        );
    }

    /// Return the live entry for `key`, or compute, store and return it.
    pub fn get_or_insert_with(&mut self, key: &str, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key) {
            return value;
        }

        trace!(key, "cache miss");
        let value = compute();
        self.set(key, value.clone());
        value
    }

    #[cfg(test)]
    pub fn get_or_insert_with_at(
        &mut self,
        key: &str,
        now: Instant,
        compute: impl FnOnce() -> V,
    ) -> V {
        if let Some(value) = self.get_at(key, now) {
            return value;
        }

        trace!(key, "cache miss");
        let value = compute();
        self.set_at(key, value.clone(), now);
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included until they are read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for DerivationCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// Cache key for the filtered view under `filter`
pub fn filtered_key(filter: Option<&str>) -> String {
    derivation_key("filtered", filter)
}

/// Cache key for the organized view under `filter`
pub fn organized_key(filter: Option<&str>) -> String {
    derivation_key("organized", filter)
}

fn derivation_key(derivation: &str, filter: Option<&str>) -> String {
    match filter {
        // "*" cannot clash with a collection literally named "all"
        None => format!("{derivation}:*"),
        Some(tab) => format!("{derivation}:/{tab}"),
    }
}
