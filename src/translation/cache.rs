/*!
 * Translation caching functionality.
 *
 * Re-running a document, or translating the same boilerplate paragraph into
 * several files of a folder, hits the backend with identical chunks. This
 * cache answers those from memory.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of chunks kept before the oldest entries are evicted
const DEFAULT_CAPACITY: usize = 1024;

/// Cache key combining source text, source language, and target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source_text: String,
    source_language: String,
    target_language: String,
}

impl CacheKey {
    fn new(source_text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct CacheStore {
    entries: HashMap<CacheKey, String>,
    insertion_order: VecDeque<CacheKey>,
}

/// Translation cache for storing and retrieving translations
///
/// Clones share the same storage and counters.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    store: Arc<RwLock<CacheStore>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
    capacity: usize,
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self::with_capacity(enabled, DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` translations
    pub fn with_capacity(enabled: bool, capacity: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::default())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            capacity: capacity.max(1),
            enabled,
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, source_text: &str, source_language: &str, target_language: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        let found = self.store.read().entries.get(&key).cloned();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for '{}' ({} -> {})", truncate_text(source_text, 30), source_language, target_language);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        found
    }

    /// Store a translation in the cache
    pub fn store(&self, source_text: &str, source_language: &str, target_language: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        let mut store = self.store.write();

        if store.entries.insert(key.clone(), translation.to_string()).is_none() {
            store.insertion_order.push_back(key);
        }

        while store.entries.len() > self.capacity {
            match store.insertion_order.pop_front() {
                Some(oldest) => {
                    store.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        let mut store = self.store.write();
        store.entries.clear();
        store.insertion_order.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.store.read().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.store.read().entries.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
