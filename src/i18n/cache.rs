//! Per-engine memoization of loaded dictionaries.
//!
//! Entries are keyed by (maximized locale, namespace) and live as long as the
//! engine. Only validated dictionaries are stored; a failed load leaves no
//! trace, so the next request retries the source. Concurrent requests for the
//! same pair are not deduplicated: both may fetch, and the second insert
//! replaces an identical value.

use crate::i18n::dictionary::Dictionary;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

type CacheKey = (String, String);

/// Loaded dictionaries for one engine.
#[derive(Debug, Default)]
pub struct MessageCache {
    entries: RwLock<HashMap<CacheKey, Arc<Dictionary>>>,
    stats: CacheStats,
}

impl MessageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a dictionary, recording a hit or miss.
    pub fn get(&self, locale: &str, namespace: &str) -> Option<Arc<Dictionary>> {
        let found = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(locale.to_string(), namespace.to_string()))
            .cloned();

        if found.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    /// Store a validated dictionary and return the shared handle.
    pub fn insert(&self, locale: &str, namespace: &str, dictionary: Dictionary) -> Arc<Dictionary> {
        let dictionary = Arc::new(dictionary);
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(
                (locale.to_string(), namespace.to_string()),
                Arc::clone(&dictionary),
            );
        dictionary
    }

    pub fn contains(&self, locale: &str, namespace: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&(locale.to_string(), namespace.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

/// Counters for cache lookups and source fetches.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache
    hits: AtomicUsize,

    /// Lookups that required a fetch
    misses: AtomicUsize,

    /// Fetches issued to the source
    fetches: AtomicUsize,

    /// Fetches that failed
    failures: AtomicUsize,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Generate a snapshot report.
    pub fn report(&self) -> CacheReport {
        let hits = self.hits();
        let misses = self.misses();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheReport {
            hits,
            misses,
            hit_rate,
            fetches: self.fetches(),
            failures: self.failures(),
        }
    }
}

/// Point-in-time view of [`CacheStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheReport {
    pub hits: usize,
    pub misses: usize,
    /// Percentage of lookups served from the cache (0-100)
    pub hit_rate: f64,
    pub fetches: usize,
    pub failures: usize,
}

impl std::fmt::Display for CacheReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cache hits: {}, misses: {} ({:.1}% hit rate), fetches: {}, failures: {}",
            self.hits, self.misses, self.hit_rate, self.fetches, self.failures
        )
    }
}
