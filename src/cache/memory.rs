//! In-memory user cache.
//!
//! Suitable for development, testing, and single-instance deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::AuthError;

use super::UserCache;

struct Entry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// In-memory [`UserCache`] backed by a `HashMap` behind a `RwLock`.
///
/// Expired entries are dropped lazily on access. Entries are lost when
/// the process restarts; use the redis backend for shared or durable
/// caching.
#[derive(Clone, Default)]
pub struct InMemoryUserCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryUserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the entry under `key` only if it is still expired.
    ///
    /// The sweep observes expiry under the read lock and removes under
    /// the write lock; a write landing between the two (a re-login for
    /// the same identifier) must not be deleted, so expiry is checked
    /// again here.
    fn remove_if_expired(&self, key: &str) -> Result<(), AuthError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuthError::CacheUnavailable("lock poisoned".to_owned()))?;

        if entries.get(key).is_some_and(Entry::is_expired) {
            entries.remove(key);
        }

        Ok(())
    }

    /// Number of entries currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), AuthError> {
        let entry = Entry {
            value,
            expires_at: Utc::now() + ttl,
        };

        self.entries
            .write()
            .map_err(|_| AuthError::CacheUnavailable("lock poisoned".to_owned()))?
            .insert(key.to_owned(), entry);

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AuthError> {
        {
            let entries = self
                .entries
                .read()
                .map_err(|_| AuthError::CacheUnavailable("lock poisoned".to_owned()))?;

            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // drop the expired entry so it cannot linger
        self.remove_if_expired(key)?;

        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        self.entries
            .write()
            .map_err(|_| AuthError::CacheUnavailable("lock poisoned".to_owned()))?
            .remove(key);

        Ok(())
    }
}
