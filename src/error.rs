/// Failures from the key-value store adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached, or an operation ran past its deadline.
    #[error("key-value store unreachable: {0}")]
    Unavailable(String),

    /// The store answered, but with something we can not make sense of.
    #[error("malformed reply from key-value store: {0}")]
    Protocol(String),
}

/// Failures surfaced by [`crate::cache::CachingLayer`]. A call either
/// returns a value or exactly one of these, never a silent default.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Whatever the producer raised, passed through untouched.
    #[error("producer failed: {0}")]
    Producer(#[source] anyhow::Error),
}
