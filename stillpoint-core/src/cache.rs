//! TTL cache for computed analytics views
//!
//! Source data changes infrequently relative to read traffic, so computed
//! views are cached by (user, window, view mode) with a short TTL. Entries
//! are never invalidated eagerly on writes; staleness up to the TTL is an
//! accepted tradeoff.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cache key: one entry per (user, window, view mode) combination.
///
/// `window` and `view` are the canonical string forms (e.g. "2026",
/// "2026-03", "overview", "duration") so the key stays cheap to build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub user_id: String,
    pub window: String,
    pub view: String,
}

impl CacheKey {
    pub fn new(user_id: &str, window: &str, view: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            window: window.to_string(),
            view: view.to_string(),
        }
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// TTL-based view cache.
///
/// Expired entries are dropped lazily on lookup; there is no background
/// sweeper since the keyspace is bounded by active users times views.
pub struct ViewCache<V> {
    entries: Mutex<HashMap<CacheKey, Entry<V>>>,
    ttl: Duration,
}

impl<V: Clone> ViewCache<V> {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a live entry, dropping it if expired.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value, replacing any previous entry for the key.
    pub fn set(&self, key: CacheKey, value: V) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop everything. Used by tests and manual refresh.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of entries currently held, including not-yet-swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
