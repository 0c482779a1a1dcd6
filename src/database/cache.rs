use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

struct Entry<H> {
    handle: H,
    last_used: AtomicU64,
}

/// Process-wide cache of live tenant handles, keyed by database name.
///
/// Lookup is a read-lock fast path; creation runs the supplied factory
/// outside the lock, so two concurrent first-time callers for the same key
/// may both construct a handle. The last insert wins and both handles are
/// functionally equivalent, so the race is harmless. Factory errors are
/// never cached - the next caller retries from scratch.
///
/// With a capacity set, inserting past the bound evicts the
/// least-recently-used entry; the evicted handle is simply dropped and is
/// reconstructed lazily if that key is ever resolved again.
pub struct PoolCache<H> {
    entries: RwLock<HashMap<String, Entry<H>>>,
    capacity: Option<usize>,
    clock: AtomicU64,
}

impl<H: Clone> PoolCache<H> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            clock: AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Return the cached handle for `key`, refreshing its recency.
    pub async fn get(&self, key: &str) -> Option<H> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| {
            entry.last_used.store(self.tick(), Ordering::Relaxed);
            entry.handle.clone()
        })
    }

    /// Return the cached handle for `key`, constructing it via `create` on
    /// a miss.
    pub async fn get_or_create<F, Fut, E>(&self, key: &str, create: F) -> Result<H, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<H, E>>,
    {
        if let Some(handle) = self.get(key).await {
            return Ok(handle);
        }

        let handle = create().await?;

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                handle: handle.clone(),
                last_used: AtomicU64::new(self.tick()),
            },
        );

        if let Some(capacity) = self.capacity {
            while entries.len() > capacity {
                // Never evict the entry we just inserted.
                let oldest = entries
                    .iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .min_by_key(|(_, e)| e.last_used.load(Ordering::Relaxed))
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(k) => {
                        entries.remove(&k);
                        debug!("evicted least-recently-used handle: {}", k);
                    }
                    None => break,
                }
            }
        }

        Ok(handle)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove and return every cached handle (e.g. for shutdown).
    pub async fn drain(&self) -> Vec<(String, H)> {
        let mut entries = self.entries.write().await;
        entries
            .drain()
            .map(|(key, entry)| (key, entry.handle))
            .collect()
    }
}
