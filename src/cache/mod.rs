//! Expiry-bound key-value storage for serialized user records.

mod memory;
#[cfg(feature = "redis")]
mod redis;

use async_trait::async_trait;
use chrono::Duration;

pub use memory::InMemoryUserCache;
#[cfg(feature = "redis")]
pub use redis::RedisUserCache;

use crate::AuthError;

/// Storage for serialized [`User`](crate::User) blobs under derived
/// keys.
///
/// Implementations must be safe under concurrent use from many
/// simultaneous requests; connection multiplexing is the backend's
/// concern. An expired entry must be indistinguishable from one never
/// written.
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Stores `value` under `key`, replacing any previous entry, gone
    /// after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CacheUnavailable` when the backend cannot
    /// be reached.
    async fn set_with_expiry(&self, key: &str, value: Vec<u8>, ttl: Duration)
        -> Result<(), AuthError>;

    /// Fetches the entry under `key`. `None` means missing or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AuthError>;

    /// Removes the entry under `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), AuthError>;
}
