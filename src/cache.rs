// Fixed-TTL memo cache keyed by (operation, arguments).
// Kept outside the client so the caching policy tests without I/O.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Short-lived memoized results for one value type. Entries expire a fixed
/// TTL after insertion; expired entries are treated as absent and can be
/// swept with [`TtlCache::purge_expired`].
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<(&'static str, String), Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Clone of the entry for (operation, args), if present and not expired.
    pub fn get(&self, operation: &'static str, args: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&(operation, args.to_string()))
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    /// Store (replacing any previous entry) with expiry `ttl` from now.
    pub fn insert(&self, operation: &'static str, args: String, value: V) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert((operation, args), entry);
    }

    /// Drop entries whose expiry has passed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| entry.expires_at > now);
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
