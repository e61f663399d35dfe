use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::cache::{CacheStats, Clock, SystemClock};

/// Default capacity
pub const DEFAULT_MAXSIZE: usize = 32;

/// Default time-to-live
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// Insertion order, oldest first. A refresh keeps the key's slot.
    order: VecDeque<K>,
    hits: u64,
    misses: u64,
}

/// Bounded, time-expiring memoization in front of a slow computation
///
/// Eviction is FIFO on first insertion: re-storing an existing key (after
/// expiry) refreshes its timestamp but not its place in the queue.
///
/// The lock is never held while `compute` runs, so two concurrent misses on
/// the same key both compute and the last writer wins.
pub struct TtlCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    maxsize: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create new cache on the wall clock
    pub fn new(maxsize: usize, ttl: Duration) -> Self {
        Self::with_clock(maxsize, ttl, Arc::new(SystemClock))
    }

    /// Create new cache with an injected clock
    pub fn with_clock(maxsize: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                hits: 0,
                misses: 0,
            }),
            maxsize,
            ttl,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let inner = self.lock();
        inner
            .entries
            .get(key)
            .filter(|entry| now.duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, evicting the oldest-inserted key when full
    pub fn insert(&self, key: K, value: V) {
        let stored_at = self.clock.now();
        let mut inner = self.lock();

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.value = value;
            entry.stored_at = stored_at;
            return;
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(key, Entry { value, stored_at });

        while inner.entries.len() > self.maxsize {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Cached value when fresh, otherwise run `compute`, store and return it
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(&key) {
            self.lock().hits += 1;
            tracing::debug!("cache hit");
            return value;
        }

        self.lock().misses += 1;
        tracing::debug!("cache miss, computing");

        let value = compute().await;
        self.insert(key, value.clone());
        value
    }

    /// Drop every entry past its TTL, returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut inner = self.lock();

        let expired: Vec<K> = inner
            .entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.stored_at) >= ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.entries.remove(key);
        }
        let Inner { entries, order, .. } = &mut *inner;
        order.retain(|key| entries.contains_key(key));

        expired.len()
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
            maxsize: self.maxsize,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_MAXSIZE, DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache_with_clock(maxsize: usize) -> (TtlCache<String, Vec<String>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(maxsize, DEFAULT_TTL, clock.clone());
        (cache, clock)
    }

    async fn lookup(cache: &TtlCache<String, Vec<String>>, key: &str, calls: &AtomicUsize) -> Vec<String> {
        cache
            .get_or_compute(key.to_string(), || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                vec![format!("{}#{}", key, n)]
            })
            .await
    }

    #[tokio::test]
    async fn test_hit_within_ttl_computes_once() {
        let (cache, clock) = cache_with_clock(32);
        let calls = AtomicUsize::new(0);

        let first = lookup(&cache, "valorant/FURIA/players", &calls).await;
        clock.advance(Duration::from_secs(299));
        let second = lookup(&cache, "valorant/FURIA/players", &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_recomputes_and_refreshes() {
        let (cache, clock) = cache_with_clock(32);
        let calls = AtomicUsize::new(0);

        lookup(&cache, "k", &calls).await;
        clock.advance(Duration::from_secs(300));
        let refreshed = lookup(&cache, "k", &calls).await;
        assert_eq!(refreshed, vec!["k#2".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // Timestamp was refreshed: still fresh 299s later
        clock.advance(Duration::from_secs(299));
        lookup(&cache, "k", &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fifo_eviction_ignores_access() {
        let (cache, _clock) = cache_with_clock(2);
        let calls = AtomicUsize::new(0);

        lookup(&cache, "a", &calls).await;
        lookup(&cache, "b", &calls).await;
        // Reading "a" does not protect it
        lookup(&cache, "a", &calls).await;
        lookup(&cache, "c", &calls).await;

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&"a".to_string()).is_none());
        assert!(cache.get(&"b".to_string()).is_some());
        assert!(cache.get(&"c".to_string()).is_some());
    }

    #[tokio::test]
    async fn test_refresh_keeps_queue_position() {
        let (cache, clock) = cache_with_clock(2);
        let calls = AtomicUsize::new(0);

        lookup(&cache, "a", &calls).await;
        lookup(&cache, "b", &calls).await;
        clock.advance(DEFAULT_TTL);
        // "a" expires and is recomputed, but stays oldest in the queue
        lookup(&cache, "a", &calls).await;
        lookup(&cache, "c", &calls).await;

        assert!(cache.get(&"a".to_string()).is_none());
        assert!(cache.get(&"c".to_string()).is_some());
    }

    #[test]
    fn test_purge_expired() {
        let (cache, clock) = cache_with_clock(32);
        cache.insert("old".to_string(), vec![]);
        clock.advance(Duration::from_secs(200));
        cache.insert("new".to_string(), vec![]);
        clock.advance(Duration::from_secs(100));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&"new".to_string()).is_some());
    }

    #[test]
    fn test_clear() {
        let (cache, _clock) = cache_with_clock(32);
        cache.insert("a".to_string(), vec!["x".to_string()]);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_default_config() {
        let cache: TtlCache<String, Vec<String>> = TtlCache::default();
        assert_eq!(cache.stats().maxsize, 32);
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }
}
