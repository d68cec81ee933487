//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use catalog_core::CatalogResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache with a TTL per entry.
///
/// Expired entries are dropped lazily when read. Used when Redis is disabled
/// and in tests.
#[derive(Debug, Default)]
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCacheService {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => {
                    debug!("Cache hit for key '{}'", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return Ok(None);
                }
            }
        }

        // Expired: drop it unless a fresh value raced in.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        debug!("Cache entry expired for key '{}'", key);
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<bool> {
        let now = Instant::now();
        let removed = self.entries.write().remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }

    async fn delete_pattern(&self, pattern: &str) -> CatalogResult<u64> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !glob_matches(pattern, key));
        let deleted = (before - entries.len()) as u64;

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

/// Matches `key` against a pattern where `*` stands for any run of characters.
fn glob_matches(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let head = parts.next().unwrap_or_default();
    let Some(mut rest) = key.strip_prefix(head) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((tail, middle)) = parts.split_last() else {
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(tail)
}
