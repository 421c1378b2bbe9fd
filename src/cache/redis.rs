//! Redis-backed user cache.

use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

use crate::config::CacheConfig;
use crate::AuthError;

use super::UserCache;

/// [`UserCache`] backed by a pooled redis connection.
///
/// TTL enforcement is native (`SET .. EX`), so nothing is swept
/// client-side. The pool is cheap to clone and shared across requests;
/// no connection is held across await points outside a single command.
#[derive(Clone)]
pub struct RedisUserCache {
    pool: Pool,
}

impl RedisUserCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool from cache configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CacheUnavailable` when the pool cannot be
    /// created. Connection failures surface per-operation.
    pub fn connect(config: &CacheConfig) -> Result<Self, AuthError> {
        let pool = Config::from_url(config.connection_url())
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| AuthError::CacheUnavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, AuthError> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthError::CacheUnavailable(e.to_string()))
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), AuthError> {
        let mut conn = self.connection().await?;
        let ttl_secs = ttl.num_seconds().max(1) as u64;

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| AuthError::CacheUnavailable(e.to_string()))?;

        log::debug!(target: "gatehouse::cache", "msg=\"cache set\" ttl_secs={ttl_secs}");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AuthError> {
        let mut conn = self.connection().await?;

        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| AuthError::CacheUnavailable(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(key)
            .await
            .map_err(|e| AuthError::CacheUnavailable(e.to_string()))
    }
}
