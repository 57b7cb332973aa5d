//! Bounded-lifetime memoization of decoded responses.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// TTL cache keyed by request signature.
///
/// One instance is shared by every in-flight call of a client. The lock is
/// scoped to individual key operations and is never held across a transport
/// call or an await, so the blocking and async paths use it identically.
/// Entries expire lazily: a stale entry is evicted by the `get` that finds
/// it. There is no entry limit; an eviction policy is an extension point.
#[derive(Debug)]
pub(crate) struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    inserted_at: Instant,
}

impl ResponseCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Stored value if present and unexpired; evicts a stale entry.
    pub(crate) fn get(&self, signature: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(signature) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(signature);
                None
            }
            None => None,
        }
    }

    /// Store a value with a fresh timestamp, overwriting any prior entry.
    pub(crate) fn put(&self, signature: String, value: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            signature,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_then_get() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("k".to_string(), json!([{"id": 1}]));
        assert_eq!(cache.get("k"), Some(json!([{"id": 1}])));
        assert_eq!(cache.get("other"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("k".to_string(), json!(1));
        cache.put("k".to_string(), json!(2));
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.put("k".to_string(), json!(1));
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get("k"), None);
        // evicted, not just hidden
        let entries = cache.entries.lock().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = std::sync::Arc::new(ResponseCache::new(Duration::from_secs(60)));
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                cache.put(format!("k{i}"), json!(i));
                cache.get(&format!("k{i}"))
            }));
        }
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(json!(i)));
        }
    }
}
