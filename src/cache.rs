use crate::error::{CacheError, StoreError};
use crate::store::Store;

/// Namespace for cached page bodies.
const CONTENT_PREFIX: &str = "cached:";
/// Namespace for per-key access counters.
const COUNT_PREFIX: &str = "count:";

/// A slow, possibly failing source of content for a key. For the shipped
/// binary this is an HTTP GET, tests script their own.
#[async_trait::async_trait]
pub trait Producer: Send + Sync {
    async fn fetch(&self, key: &str) -> anyhow::Result<String>;
}

/// Cache-aside wrapper around a [`Producer`].
///
/// Every logical access bumps the key's counter, hit or miss, so the counter
/// answers "how often was this requested", not "how often was it fetched".
/// On a miss the producer result is written back with a TTL; expiry is the
/// only eviction, there is no explicit invalidation path.
///
/// Concurrent misses on the same key are not deduplicated: both callers
/// fetch, and the last write wins. The counter is exact regardless, its
/// atomicity is delegated to the store.
pub struct CachingLayer<S, P> {
    store: S,
    producer: P,
}

impl<S: Store, P: Producer> CachingLayer<S, P> {
    pub fn new(store: S, producer: P) -> Self {
        Self { store, producer }
    }

    /// Return the content for `key`, from cache when a live entry exists,
    /// otherwise from the producer (caching the result for `ttl_secs`).
    ///
    /// Producer errors pass through unchanged; store failures surface as
    /// [`CacheError::Store`]. No retries on either path.
    pub async fn cached_access(&self, key: &str, ttl_secs: u64) -> Result<String, CacheError> {
        let hits = self.store.incr(&format!("{COUNT_PREFIX}{key}")).await?;

        let content_key = format!("{CONTENT_PREFIX}{key}");
        if let Some(cached) = self.store.get(&content_key).await? {
            tracing::debug!(key, hits, "cache hit");
            let page = String::from_utf8(cached).map_err(|_| {
                StoreError::Protocol(format!("cached value for `{key}` is not valid utf-8"))
            })?;
            return Ok(page);
        }

        tracing::debug!(key, hits, "cache miss, invoking producer");
        let page = self
            .producer
            .fetch(key)
            .await
            .map_err(CacheError::Producer)?;

        self.store
            .set_with_expiry(&content_key, page.as_bytes(), ttl_secs)
            .await?;
        tracing::debug!(key, ttl_secs, bytes = page.len(), "cached producer result");

        Ok(page)
    }

    /// How many times `key` has been requested so far. Zero for keys never
    /// seen. Counters only grow, nothing in this layer resets them.
    pub async fn access_count(&self, key: &str) -> Result<i64, CacheError> {
        let raw = self.store.get(&format!("{COUNT_PREFIX}{key}")).await?;
        match raw {
            None => Ok(0),
            Some(bytes) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| {
                    StoreError::Protocol(format!("counter for `{key}` is not an integer")).into()
                }),
        }
    }
}
