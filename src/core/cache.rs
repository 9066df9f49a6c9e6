use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub hit_rate_percent: f64,
}

#[derive(Clone)]
struct CacheEntry<T> {
    value: T,
    cached_at: u64,
}

/// Memoization cache with a fixed time-to-live.
///
/// Keys are the literal song-name strings, case-sensitive and unnormalized.
/// Entries past the TTL are dropped on the next read; there is no background
/// eviction and no bound on the key count.
pub struct TtlCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
    total_requests: u64,
    cache_hits: u64,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            total_requests: 0,
            cache_hits: 0,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<T> {
        self.total_requests += 1;
        let now = current_timestamp();

        let expired = match self.entries.get(key) {
            Some(entry) => now.saturating_sub(entry.cached_at) >= self.ttl.as_secs(),
            None => {
                debug!("Cache miss for: {}", key);
                return None;
            }
        };

        if expired {
            debug!("Cache entry expired for: {}", key);
            self.entries.remove(key);
            return None;
        }

        self.cache_hits += 1;
        debug!("Cache hit for: {}", key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn put(&mut self, key: &str, value: T) {
        let entry = CacheEntry {
            value,
            cached_at: current_timestamp(),
        };
        self.entries.insert(key.to_string(), entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_requests = 0;
        self.cache_hits = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let hit_rate = if self.total_requests > 0 {
            (self.cache_hits as f64 / self.total_requests as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            total_entries: self.entries.len(),
            total_requests: self.total_requests,
            cache_hits: self.cache_hits,
            hit_rate_percent: hit_rate,
        }
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs()
}
