//! Time-bounded in-memory cache for fetched listings and trees.

use std::collections::HashMap;

/// One cached value plus the wall-clock time it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub stored_at: f64,
    /// Listing fingerprint at store time, when the caller computed one.
    pub fingerprint: Option<String>,
}

/// String-keyed cache whose entries expire `ttl_ms` after insertion.
///
/// Expiry is exclusive: an entry aged exactly `ttl_ms` is already stale.
#[derive(Debug)]
pub struct TtlCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl_ms: f64,
}

impl<T> TtlCache<T> {
    pub fn new(ttl_ms: f64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.get_at(key, now_ms())
    }

    pub fn insert(&mut self, key: impl Into<String>, data: T, fingerprint: Option<String>) {
        self.insert_at(key, data, fingerprint, now_ms());
    }

    /// Lookup against an explicit clock reading.
    pub fn get_at(&self, key: &str, now: f64) -> Option<&CacheEntry<T>> {
        let entry = self.entries.get(key)?;
        if now - entry.stored_at < self.ttl_ms {
            Some(entry)
        } else {
            None
        }
    }

    /// Insert against an explicit clock reading.
    pub fn insert_at(
        &mut self,
        key: impl Into<String>,
        data: T,
        fingerprint: Option<String>,
        now: f64,
    ) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                data,
                stored_at: now,
                fingerprint,
            },
        );
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_expires_at_exact_ttl() {
        let mut cache = TtlCache::new(1000.0);
        cache.insert_at("k", 42u32, None, 0.0);
        assert_eq!(cache.get_at("k", 0.0).map(|e| e.data), Some(42));
        assert_eq!(cache.get_at("k", 999.0).map(|e| e.data), Some(42));
        assert!(cache.get_at("k", 1000.0).is_none());
        assert!(cache.get_at("k", 5000.0).is_none());
    }

    #[test]
    fn insert_refreshes_clock_and_data() {
        let mut cache = TtlCache::new(1000.0);
        cache.insert_at("k", 1u32, None, 0.0);
        cache.insert_at("k", 2u32, None, 900.0);
        assert_eq!(cache.get_at("k", 1800.0).map(|e| e.data), Some(2));
    }

    #[test]
    fn invalidate_and_clear_remove_entries() {
        let mut cache = TtlCache::new(1000.0);
        cache.insert_at("a", 1u32, None, 0.0);
        cache.insert_at("b", 2u32, None, 0.0);
        cache.invalidate("a");
        assert!(cache.get_at("a", 1.0).is_none());
        assert_eq!(cache.get_at("b", 1.0).map(|e| e.data), Some(2));
        cache.clear();
        assert!(cache.get_at("b", 1.0).is_none());
    }

    #[test]
    fn fingerprint_survives_with_entry() {
        let mut cache = TtlCache::new(1000.0);
        cache.insert_at("k", 7u32, Some("abc123".into()), 0.0);
        let fp = cache
            .get_at("k", 10.0)
            .and_then(|e| e.fingerprint.clone());
        assert_eq!(fp.as_deref(), Some("abc123"));
    }
}
