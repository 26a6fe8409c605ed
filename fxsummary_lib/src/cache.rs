//! In-memory rate cache backed by `DashMap` for concurrent access.
//!
//! Entries expire after a TTL and the cache holds at most `capacity` entries,
//! evicting the least-recently-used entry (by last access, not insertion) on
//! overflow. Expired entries are lazily removed on `get` and swept on `put`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::types::RateSeries;

/// Default maximum number of live entries.
pub const DEFAULT_CAPACITY: usize = 256;
/// Default time-to-live for entries (15 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(900);

struct CacheEntry {
    series: RateSeries,
    expires_at: Instant,
    /// Logical access timestamp, bumped on every hit. Smallest value loses
    /// on capacity eviction.
    last_access: AtomicU64,
}

/// Thread-safe rate cache with TTL expiry and LRU capacity eviction.
///
/// TTL and capacity are independent triggers: either alone is enough to
/// remove an entry. The cache owns clones of the series it stores, so a
/// caller can never mutate cached state from the outside.
pub struct RateCache {
    store: DashMap<String, CacheEntry>,
    capacity: usize,
    ttl: Duration,
    clock: AtomicU64,
}

impl RateCache {
    /// Creates a cache with explicit capacity and TTL.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            capacity,
            ttl,
            clock: AtomicU64::new(0),
        }
    }

    /// Returns the cached series for `key`, or `None` if missing or expired.
    /// A hit marks the entry as most recently used.
    pub fn get(&self, key: &str) -> Option<RateSeries> {
        let now = Instant::now();
        let entry = self.store.get(key)?;
        if now > entry.expires_at {
            drop(entry);
            // Re-check under the entry lock: a concurrent put may have
            // replaced the expired entry with a fresh one in the meantime.
            self.store.remove_if(key, |_, e| now > e.expires_at);
            return None;
        }
        entry.last_access.store(self.tick(), Ordering::Relaxed);
        Some(entry.series.clone())
    }

    /// Inserts or replaces the entry for `key` with a fresh timestamp, then
    /// enforces the capacity bound.
    pub fn put(&self, key: String, series: RateSeries) {
        self.store.insert(
            key,
            CacheEntry {
                series,
                expires_at: Instant::now() + self.ttl,
                last_access: AtomicU64::new(self.tick()),
            },
        );
        self.evict_overflow();
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of stored entries, expired or not (for testing).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Drops expired entries first; if the cache is still over capacity,
    /// removes least-recently-accessed entries until it fits.
    fn evict_overflow(&self) {
        let now = Instant::now();
        self.store.retain(|_, entry| entry.expires_at > now);

        while self.store.len() > self.capacity {
            let lru_key = self
                .store
                .iter()
                .min_by_key(|entry| entry.value().last_access.load(Ordering::Relaxed))
                .map(|entry| entry.key().clone());
            match lru_key {
                Some(key) => {
                    self.store.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}
