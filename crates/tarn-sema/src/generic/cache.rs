// generic/cache.rs
//
// Identity-keyed cache of parameterised instances.

use std::hash::Hash;
use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashMap;

/// Insert-if-absent cache from a structural key to the canonical instance.
///
/// Tracks lookup hit/miss statistics for debugging how often parameterisations
/// are reused versus materialised.
#[derive(Debug)]
pub struct InstanceCache<K, V> {
    instances: FxHashMap<K, V>,
    /// Lookups that found an instance. Atomic so `&self` lookups can count.
    hits: AtomicU32,
    /// Lookups that found nothing.
    misses: AtomicU32,
}

impl<K: Clone, V: Clone> Clone for InstanceCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            instances: self.instances.clone(),
            hits: AtomicU32::new(self.hits.load(Ordering::Relaxed)),
            misses: AtomicU32::new(self.misses.load(Ordering::Relaxed)),
        }
    }
}

impl<K: Hash + Eq, V> Default for InstanceCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> InstanceCache<K, V> {
    pub fn new() -> Self {
        Self {
            instances: FxHashMap::default(),
            hits: AtomicU32::new(0),
            misses: AtomicU32::new(0),
        }
    }

    /// Look up an instance, counting the hit or miss.
    pub fn get(&self, key: &K) -> Option<&V> {
        let result = self.instances.get(key);
        self.record_lookup(result.is_some());
        result
    }

    fn record_lookup(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Insert unless an instance is already cached; returns the cached one.
    pub fn insert(&mut self, key: K, instance: V) -> &V {
        self.instances.entry(key).or_insert(instance)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    // ===== Metrics =====

    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u32 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hit rate as a percentage (0.0 - 100.0); 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hit_count();
        let total = hits + self.miss_count();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    pub fn clear_metrics(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn log_stats(&self, cache_name: &str) {
        tracing::debug!(
            cache = cache_name,
            entries = self.instances.len(),
            hits = self.hit_count(),
            misses = self.miss_count(),
            hit_rate = format_args!("{:.1}%", self.hit_rate()),
            "instance cache statistics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_the_first_instance() {
        let mut cache: InstanceCache<(u32, u32), &str> = InstanceCache::new();
        assert_eq!(*cache.insert((1, 2), "first"), "first");
        assert_eq!(*cache.insert((1, 2), "second"), "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_counts_hits_and_misses() {
        let mut cache: InstanceCache<u32, u32> = InstanceCache::new();
        cache.insert(7, 70);

        assert_eq!(cache.get(&7), Some(&70));
        assert_eq!(cache.get(&8), None);

        assert_eq!(cache.hit_count(), 1);
        assert_eq!(cache.miss_count(), 1);
        assert!((cache.hit_rate() - 50.0).abs() < f64::EPSILON);

        cache.clear_metrics();
        assert_eq!(cache.hit_rate(), 0.0);
    }
}
