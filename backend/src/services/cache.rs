//! In-process TTL cache for outbound API responses.
//!
//! Read-through only: entries expire after a fixed TTL and are never
//! invalidated explicitly.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Expired entries are swept once the map grows past this size, at most once
/// per TTL
const SWEEP_THRESHOLD: usize = 1024;

struct Entries<K, V> {
    map: HashMap<K, (Instant, V)>,
    next_sweep: Instant,
}

pub struct TtlCache<K, V> {
    entries: RwLock<Entries<K, V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                next_sweep: Instant::now(),
            }),
            ttl,
        }
    }

    /// Get a value if it was stored less than one TTL ago
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read();
        match entries.map.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write();
        let now = Instant::now();
        if entries.map.len() >= SWEEP_THRESHOLD && now >= entries.next_sweep {
            let ttl = self.ttl;
            entries
                .map
                .retain(|_, (stored_at, _)| now.duration_since(*stored_at) < ttl);
            // Nothing stored before `now` can expire sooner than this
            entries.next_sweep = now + ttl;
        }
        entries.map.insert(key, (now, value));
    }

    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("pune", 42);
        assert_eq!(cache.get(&"pune"), Some(42));
        assert_eq!(cache.get(&"nashik"), None);
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert(1u8, "value");
        assert_eq!(cache.get(&1u8), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_replaces_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1);
        cache.insert("k", 2);
        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sweep_drops_expired_entries() {
        let cache = TtlCache::new(Duration::ZERO);
        for i in 0..SWEEP_THRESHOLD {
            cache.insert(i, i);
        }
        cache.insert(SWEEP_THRESHOLD, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_live_entries_are_not_swept_on_every_insert() {
        let cache = TtlCache::new(Duration::from_secs(60));
        for i in 0..SWEEP_THRESHOLD {
            cache.insert(i, i);
        }

        // First insert past the threshold sweeps and frees nothing
        cache.insert(SWEEP_THRESHOLD, 0);
        let next_sweep = cache.entries.read().next_sweep;
        assert!(next_sweep > Instant::now() + Duration::from_secs(50));

        // Later inserts within the TTL leave the schedule alone
        for i in SWEEP_THRESHOLD + 1..SWEEP_THRESHOLD + 100 {
            cache.insert(i, i);
        }
        assert_eq!(cache.entries.read().next_sweep, next_sweep);
        assert_eq!(cache.len(), SWEEP_THRESHOLD + 100);
    }
}
