//! Single-entry cache for the provider's model catalog.
//!
//! The catalog changes rarely, so one fetch is reused for twelve hours
//! before the provider is asked again. Expiry is checked on read; a
//! stale entry is simply not returned.

use std::time::{Duration, SystemTime};

use crate::settings::constants::MODEL_CACHE_TTL;
use crate::translation::provider::ModelInfo;

pub type ModelCatalog = Vec<ModelInfo>;

struct CacheEntry {
    catalog: ModelCatalog,
    created_at: SystemTime,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        if let Ok(elapsed) = self.created_at.elapsed() {
            elapsed > ttl
        } else {
            true
        }
    }
}

pub struct ModelCache {
    entry: Option<CacheEntry>,
    ttl: Duration,
}

impl ModelCache {
    pub fn new() -> Self {
        ModelCache::with_ttl(MODEL_CACHE_TTL)
    }

    /// Cache with a caller-chosen lifetime for entries.
    pub fn with_ttl(ttl: Duration) -> Self {
        ModelCache { entry: None, ttl }
    }

    /// Current catalog, or `None` when nothing is cached or the entry
    /// has outlived the TTL.
    pub fn get(&self) -> Option<&ModelCatalog> {
        match &self.entry {
            Some(entry) if !entry.is_expired(self.ttl) => Some(&entry.catalog),
            _ => None,
        }
    }

    pub fn put(&mut self, catalog: ModelCatalog) {
        self.entry = Some(CacheEntry {
            catalog,
            created_at: SystemTime::now(),
        });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        ModelCache::new()
    }
}
