//! Bounded in-memory cache with per-entry TTL and LRU eviction.
//!
//! Used for three roles with separate sizing: final answers keyed by
//! `(text, mode, limit)`, per-token conversions keyed by `(tier, token)`, and a
//! general-purpose instance. Every read-modify-write sequence runs under one
//! mutex per instance, so the expired-check, eviction and hit/miss counting of
//! a `get` are atomic with respect to other callers.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of the key parts. Deterministic across runs, not reversible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Derive a cache key from its parts.
///
/// Each part is length-prefixed before hashing, so `["ab", "c"]` and
/// `["a", "bc"]` never collide regardless of part content.
pub fn cache_key(parts: &[&str]) -> CacheKey {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    CacheKey(format!("{:x}", hasher.finalize()))
}

struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` overflows; such entries never expire.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

struct Inner<V> {
    entries: LruCache<CacheKey, CacheEntry<V>>,
    hits: u64,
    misses: u64,
}

/// Snapshot of a cache's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub max_size: usize,
}

pub struct TtlCache<V> {
    inner: Mutex<Inner<V>>,
    max_size: usize,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::unbounded(),
                hits: 0,
                misses: 0,
            }),
            max_size,
            default_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // A panic while holding the lock cannot leave an entry half-written:
        // entries are replaced wholesale. Keep serving after poisoning.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look up `key`, promoting it to most-recently-used on a hit.
    /// Expired entries are removed and counted as misses.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        let mut inner = self.lock();
        // `get` promotes; an expired entry is popped right after anyway.
        let found = inner
            .entries
            .get(key)
            .map(|entry| (entry.is_expired(now), entry.value.clone()));
        match found {
            Some((false, value)) => {
                inner.hits += 1;
                Some(value)
            }
            Some((true, _)) => {
                inner.entries.pop(key);
                inner.misses += 1;
                None
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert with the default TTL.
    pub fn set(&self, key: CacheKey, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Insert or overwrite, then evict least-recently-used entries until the
    /// cache is back within `max_size`.
    pub fn set_with_ttl(&self, key: CacheKey, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        let mut inner = self.lock();
        inner.entries.put(key, entry);
        while inner.entries.len() > self.max_size {
            if inner.entries.pop_lru().is_none() {
                break;
            }
        }
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            size: inner.entries.len(),
            max_size: self.max_size,
        }
    }
}
