use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::feed::FeedEntry;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Keyed store of fetched entries. Keys are the raw query text.
#[async_trait]
pub trait FeedCache: Send + Sync {
    /// Entries cached for `query`, or `None` when absent or older than the TTL.
    async fn get(&self, query: &str) -> Option<Vec<FeedEntry>>;

    async fn insert(&self, query: String, entries: Vec<FeedEntry>);
}

pub type SharedFeedCache = Arc<dyn FeedCache>;

#[derive(Debug, Clone)]
struct CacheSlot {
    entries: Vec<FeedEntry>,
    inserted_at: Instant,
}

impl CacheSlot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Process-scoped in-memory cache. No capacity bound; slots are replaced
/// once they go stale.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    ttl: Duration,
    slots: Arc<RwLock<HashMap<String, CacheSlot>>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn shared(ttl: Duration) -> SharedFeedCache {
        Arc::new(Self::new(ttl))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of slots held, stale ones included.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[async_trait]
impl FeedCache for MemoryCache {
    async fn get(&self, query: &str) -> Option<Vec<FeedEntry>> {
        let slots = self.slots.read().await;
        match slots.get(query) {
            Some(slot) if slot.is_fresh(self.ttl) => Some(slot.entries.clone()),
            Some(_) => {
                debug!(query, "cache slot expired");
                None
            }
            None => None,
        }
    }

    async fn insert(&self, query: String, entries: Vec<FeedEntry>) {
        let slot = CacheSlot {
            entries,
            inserted_at: Instant::now(),
        };
        self.slots.write().await.insert(query, slot);
    }
}
