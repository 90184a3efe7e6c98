//! Bounded image-lookup memo cache
//!
//! Process-wide map from a lookup key to the primary provider's result.
//! `Some(url)` memoizes a hit; `None` is the negative sentinel that stops the
//! primary provider being re-queried for a key already known to fail.
//!
//! Capacity-bounded with FIFO eviction; all access goes through one mutex, so
//! concurrent requests serialize on the cache and the worst concurrent
//! outcome is a few duplicate upstream calls, never a torn entry.

use std::collections::{HashMap, VecDeque};

use tokio::sync::Mutex;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Capacity-bounded FIFO memo cache
pub struct ImageCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    map: HashMap<String, Option<String>>,
    order: VecDeque<String>,
}

impl ImageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner { map: HashMap::new(), order: VecDeque::new() }),
        }
    }

    /// Cached entry for a key: `None` = never looked up,
    /// `Some(None)` = negative sentinel, `Some(Some(url))` = memoized hit
    pub async fn get(&self, key: &str) -> Option<Option<String>> {
        self.inner.lock().await.map.get(key).cloned()
    }

    pub async fn insert(&self, key: String, value: Option<String>) {
        let mut inner = self.inner.lock().await;
        if inner.map.insert(key.clone(), value).is_none() {
            inner.order.push_back(key);
        }
        while inner.map.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.map.remove(&oldest);
            } else {
                break;
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.map.len()
    }
}

/// Normalize a place name into its cache key
pub fn cache_key(name: &str) -> String {
    name.trim().to_lowercase()
}
