//! # Short-TTL request cache
//!
//! [`RequestCache`] avoids redundant network reads within a small time window
//! for a handful of read endpoints (today it is only the check-in status).
//! It is intentionally minimal: an in-memory map with lazy expiry on read.
//! There is no background sweep, no capacity bound, and no LRU behavior.
//!
//! Invalidation happens in two ways:
//! - lazily, when `get` observes an expired entry and evicts it;
//! - explicitly, via [`RequestCache::clear_matching`] after a state-changing
//!   call (completing a check-in clears every `/checkin` key so the next read
//!   bypasses the cache).
//!
//! Entries never persist across reloads; the cache lives inside the
//! [`crate::ApiClient`] and dies with it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crate::time::now_ms;

/// Build the cache key for a request.
///
/// Deterministic: parameters are sorted by key before joining, so call sites
/// that build their parameter lists in different orders still share an entry.
pub fn cache_key(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort();
    let mut key = format!("{method}:{url}");
    for (i, (name, value)) in sorted.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: Value,
    expires_at_ms: u64,
}

/// In-memory response cache with absolute-expiry entries.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, overwriting any existing entry.
    pub fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.set_at(key, value, ttl, now_ms());
    }

    /// Return the stored value if it has not expired; evict it otherwise.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, now_ms())
    }

    /// Remove a single entry.
    pub fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Drop every entry whose key contains `pattern`.
    ///
    /// Used after a state-changing call to force the next read through to the
    /// network. A substring match covers every call site (patterns are URL
    /// fragments like `/checkin`).
    pub fn clear_matching(&self, pattern: &str) {
        self.entries
            .lock()
            .unwrap()
            .retain(|key, _| !key.contains(pattern));
    }

    fn set_at(&self, key: &str, value: Value, ttl: Duration, now: u64) {
        let entry = CacheEntry {
            value,
            expires_at_ms: now.saturating_add(ttl.as_millis() as u64),
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }

    fn get_at(&self, key: &str, now: u64) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if now < entry.expires_at_ms => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn key_is_deterministic_and_order_insensitive() {
        let a = cache_key(
            "GET",
            "/api/checkin/status",
            &[pair("page", "1"), pair("size", "20")],
        );
        let b = cache_key(
            "GET",
            "/api/checkin/status",
            &[pair("size", "20"), pair("page", "1")],
        );
        assert_eq!(a, b);
        assert_eq!(a, "GET:/api/checkin/status?page=1&size=20");

        // Repeated calls with equal inputs produce an equal key.
        assert_eq!(a, cache_key("GET", "/api/checkin/status", &[pair("page", "1"), pair("size", "20")]));
    }

    #[test]
    fn key_distinguishes_method_url_and_params() {
        let base = cache_key("GET", "/api/news", &[]);
        assert_ne!(base, cache_key("POST", "/api/news", &[]));
        assert_ne!(base, cache_key("GET", "/api/projects", &[]));
        assert_ne!(base, cache_key("GET", "/api/news", &[pair("page", "2")]));
    }

    #[test]
    fn hit_before_ttl_miss_and_evict_after() {
        let cache = RequestCache::new();
        cache.set_at("k", json!({"streak": 4}), Duration::from_millis(100), 1_000);

        // t < ttl: hit
        assert_eq!(cache.get_at("k", 1_099), Some(json!({"streak": 4})));
        // t >= ttl: miss, entry removed
        assert_eq!(cache.get_at("k", 1_100), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let cache = RequestCache::new();
        cache.set_at("k", json!(1), Duration::from_secs(1), 0);
        cache.set_at("k", json!(2), Duration::from_secs(1), 0);
        assert_eq!(cache.get_at("k", 500), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_matching_only_touches_matching_keys() {
        let cache = RequestCache::new();
        cache.set_at("GET:/api/checkin/status", json!(1), Duration::from_secs(60), 0);
        cache.set_at("GET:/api/news?page=1", json!(2), Duration::from_secs(60), 0);

        cache.clear_matching("/checkin");

        assert_eq!(cache.get_at("GET:/api/checkin/status", 1), None);
        assert_eq!(cache.get_at("GET:/api/news?page=1", 1), Some(json!(2)));
    }

    #[test]
    fn remove_and_clear() {
        let cache = RequestCache::new();
        cache.set_at("a", json!(1), Duration::from_secs(60), 0);
        cache.set_at("b", json!(2), Duration::from_secs(60), 0);

        cache.remove("a");
        assert_eq!(cache.get_at("a", 1), None);
        assert_eq!(cache.get_at("b", 1), Some(json!(2)));

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
