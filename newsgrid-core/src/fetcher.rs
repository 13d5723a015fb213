use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::{Client, Response};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::cache::{SharedFeedCache, DEFAULT_CACHE_TTL};
use crate::error::FetchError;
use crate::feed::FeedEntry;
use crate::query::{feed_url, FeedLocale, DEFAULT_ENDPOINT};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub endpoint: String,
    pub locale: FeedLocale,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub max_feed_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            locale: FeedLocale::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: Duration::from_secs(5),
            max_feed_bytes: 4 * 1024 * 1024,
        }
    }
}

type Outcome = Result<Vec<FeedEntry>, Arc<FetchError>>;

/// Turns a query into feed entries, going upstream only on cache misses.
#[derive(Clone)]
pub struct NewsFetcher {
    client: Client,
    cache: SharedFeedCache,
    config: FetchConfig,
    // query -> outcome of the upstream request currently running for it
    inflight: Arc<Mutex<HashMap<String, Arc<OnceCell<Outcome>>>>>,
}

impl NewsFetcher {
    pub fn new(client: Client, cache: SharedFeedCache, config: FetchConfig) -> Self {
        Self {
            client,
            cache,
            config,
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Entries for `query`, or an empty list when the feed cannot be
    /// retrieved or parsed.
    pub async fn fetch(&self, query: &str) -> Vec<FeedEntry> {
        match self.try_fetch(query).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(query, error = %err, "failed to fetch feed");
                Vec::new()
            }
        }
    }

    /// Concurrent misses for the same query share one upstream request and
    /// all observe its outcome, failures included.
    pub async fn try_fetch(&self, query: &str) -> Result<Vec<FeedEntry>, Arc<FetchError>> {
        if let Some(entries) = self.cache.get(query).await {
            debug!(query, count = entries.len(), "cache hit");
            return Ok(entries);
        }

        let cell = self.inflight_cell(query).await;
        let outcome = cell
            .get_or_init(|| async {
                // A request that finished just before this cell was created
                // has already filled the slot.
                if let Some(entries) = self.cache.get(query).await {
                    return Ok(entries);
                }
                let result = self.fetch_upstream(query).await;
                if let Ok(entries) = &result {
                    self.cache.insert(query.to_owned(), entries.clone()).await;
                }
                result.map_err(Arc::new)
            })
            .await
            .clone();
        self.release(query, &cell).await;
        outcome
    }

    async fn inflight_cell(&self, query: &str) -> Arc<OnceCell<Outcome>> {
        let mut inflight = self.inflight.lock().await;
        inflight.entry(query.to_owned()).or_default().clone()
    }

    // The slot is already cached on success, so later callers never need the
    // cell; dropping it lets a failed query be retried.
    async fn release(&self, query: &str, cell: &Arc<OnceCell<Outcome>>) {
        let mut inflight = self.inflight.lock().await;
        if inflight
            .get(query)
            .is_some_and(|current| Arc::ptr_eq(current, cell))
        {
            inflight.remove(query);
        }
    }

    /// Number of queries with an upstream request in progress.
    pub async fn inflight_len(&self) -> usize {
        self.inflight.lock().await.len()
    }

    async fn fetch_upstream(&self, query: &str) -> Result<Vec<FeedEntry>, FetchError> {
        let url = feed_url(&self.config.endpoint, &self.config.locale, query)?;
        info!(query, %url, "fetching feed");

        let response = self
            .client
            .get(url)
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = read_capped(response, self.config.max_feed_bytes).await?;
        let entries = parse_feed(&body)?;
        info!(query, count = entries.len(), "feed fetched");
        Ok(entries)
    }
}

async fn read_capped(response: Response, limit: usize) -> Result<BytesMut, FetchError> {
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::TooLarge { limit });
        }
    }
    let mut buf = BytesMut::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if buf.len() + chunk.len() > limit {
            return Err(FetchError::TooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Parses an RSS 2.0 document, falling back to Atom. Entries keep document
/// order.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>, FetchError> {
    let rss_err = match rss::Channel::read_from(body) {
        Ok(channel) => {
            return Ok(channel.items().iter().map(FeedEntry::from_rss_item).collect());
        }
        Err(err) => err,
    };

    match atom_syndication::Feed::read_from(body) {
        Ok(feed) => Ok(feed.entries().iter().map(FeedEntry::from_atom_entry).collect()),
        Err(atom_err) => Err(FetchError::Parse {
            rss: rss_err,
            atom: atom_err,
        }),
    }
}
