//! Lookup result cache keyed by resolved lookup URL.

use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::TitleResolver;
use crate::errors::AutolinkError;

#[derive(Debug, Clone)]
struct CacheEntry {
    title: String,
    stored_at: Instant,
}

/// Wraps a resolver and remembers successful titles for `ttl`.
///
/// Failures are never cached, so a flaky tracker is retried on the next
/// message. When full, expired entries are dropped first, then the oldest.
#[derive(Debug)]
pub struct CachingResolver<R> {
    inner: R,
    entries: Mutex<HashMap<String, CacheEntry>>,
    capacity: usize,
    ttl: Duration,
}

impl<R: TitleResolver> CachingResolver<R> {
    pub fn new(inner: R, capacity: usize, ttl: Duration) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            capacity,
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, url: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(url)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.title.clone())
    }

    fn store(&self, url: &str, title: &str) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity && !entries.contains_key(url) {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at)
                    .map(|(key, _)| key.clone());
                if let Some(key) = oldest {
                    entries.remove(&key);
                }
            }
        }
        entries.insert(
            url.to_string(),
            CacheEntry {
                title: title.to_string(),
                stored_at: Instant::now(),
            },
        );
    }
}

impl<R: TitleResolver> TitleResolver for CachingResolver<R> {
    fn resolve(&self, url: &str) -> Result<String, AutolinkError> {
        if let Some(title) = self.cached(url) {
            debug!("Serving lookup title from cache for {}", url);
            return Ok(title);
        }
        // The lock is not held across the fetch.
        let title = self.inner.resolve(url)?;
        self.store(url, &title);
        Ok(title)
    }
}
