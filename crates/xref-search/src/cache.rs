//! Keyed cache with per-entry expiry.

use std::{
    borrow::Borrow,
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

use parking_lot::RwLock;

/// A stored value and when it was stored.
#[derive(Debug)]
struct CacheEntry<V> {
    /// Insertion time.
    stored_at: Instant,
    /// Cached value.
    value: V,
}

/// A thread-safe map whose entries expire a fixed duration after they are stored.
///
/// Expired entries are evicted when read; [`sweep`](Self::sweep) evicts them eagerly.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Lifetime of each entry.
    ttl: Duration,
    /// Stored entries.
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the value for `key` if it was stored less than `ttl` ago.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Instant::now())
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: K, value: V) {
        self.set_at(key, value, Instant::now());
    }

    /// Removes every entry.
    pub fn reset(&self) {
        self.entries.write().clear();
    }

    /// Removes expired entries and returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    /// Number of stored entries, live or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Lifetime of each entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Lookup relative to `now`.
    fn get_at<Q>(&self, key: &Q, now: Instant) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        {
            let entries = self.entries.read();
            let entry = entries.get(key)?;
            if self.is_live(entry, now) {
                return Some(entry.value.clone());
            }
        }

        let mut entries = self.entries.write();
        // Another writer may have refreshed the entry since the read lock was released.
        if let Some(entry) = entries.get(key) {
            if self.is_live(entry, now) {
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        None
    }

    /// Insertion stamped with `now`.
    fn set_at(&self, key: K, value: V, now: Instant) {
        self.entries.write().insert(
            key,
            CacheEntry {
                stored_at: now,
                value,
            },
        );
    }

    /// Sweep relative to `now`.
    fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.stored_at) < self.ttl);
        before - entries.len()
    }

    /// Returns true if `entry` has not yet expired at `now`.
    fn is_live(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }
}

#[cfg(test)]
mod test {
    use std::{sync::Arc, thread};

    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn returns_live_values() {
        let cache = TtlCache::new(TTL);
        assert!(cache.get(&"a").is_none());

        cache.set("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));

        cache.set("a", 2);
        assert_eq!(cache.get(&"a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expires_after_ttl() {
        let cache = TtlCache::new(TTL);
        let start = Instant::now();
        cache.set_at("a", 1, start);

        assert_eq!(cache.get_at(&"a", start + TTL - Duration::from_millis(1)), Some(1));
        assert_eq!(cache.get_at(&"a", start + TTL), None);
        // The expired entry was evicted by the read.
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_never_serves() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set("a", 1);
        assert!(cache.get(&"a").is_none());
    }

    #[test]
    fn sweep_removes_only_expired() {
        let cache = TtlCache::new(TTL);
        let start = Instant::now();
        cache.set_at("old", 1, start);
        cache.set_at("new", 2, start + TTL);

        assert_eq!(cache.sweep_at(start + TTL), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_at(&"new", start + TTL), Some(2));
    }

    #[test]
    fn reset_clears_everything() {
        let cache = TtlCache::new(TTL);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.ttl(), TTL);
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let cache = Arc::new(TtlCache::new(TTL));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.set(i, t);
                        assert!(cache.get(&i).is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 100);
    }
}
