use std::future::Future;
use std::time::Duration;

use redis::{aio::ConnectionManager, AsyncCommands};

use crate::error::StoreError;

/// The four operations the caching layer needs from a key-value store.
///
/// Backends must keep `incr` atomic under concurrent callers, that is the
/// one primitive all counting correctness hangs on. `expire` exists for
/// backends that can not combine value and TTL into a single write.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &[u8],
        ttl_secs: u64,
    ) -> Result<(), StoreError>;

    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), StoreError>;
}

/// Redis-backed [`Store`] over a process-wide [`ConnectionManager`].
///
/// The manager multiplexes one connection and reconnects on its own, so this
/// handle is cheap to clone and safe to share across tasks. Connect once at
/// startup and reuse, no per-call connection setup.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStore {
    pub async fn connect(addr: &str, op_timeout: Duration) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(addr).map_err(|e| StoreError::Protocol(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { conn, op_timeout })
    }

    /// Run one redis command under the configured deadline. An elapsed
    /// deadline counts as the store being unreachable.
    async fn run<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(StoreError::Unavailable(format!(
                "operation timed out after {:?}",
                self.op_timeout
            ))),
        }
    }
}

fn classify(err: redis::RedisError) -> StoreError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Protocol(err.to_string())
    }
}

#[async_trait::async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.get(key)).await
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &[u8],
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        // SETEX writes value and TTL in one atomic command.
        self.run(conn.set_ex(key, value, ttl_secs)).await
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.incr(key, 1)).await
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.expire(key, ttl_secs as i64)).await
    }
}
