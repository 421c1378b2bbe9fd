//! Shared fakes and helpers for the integration suites.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};

use gatehouse::{AuthError, CredentialStore, User, UserCache};

/// Credential store fake with byte-equality secret comparison.
#[derive(Clone, Default)]
pub struct FakeCredentialStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl FakeCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: &[(&str, &[u8])]) -> Self {
        let store = Self::new();
        for (identifier, secret) in users {
            store.add(User::new(*identifier, secret.to_vec()));
        }
        store
    }

    pub fn add(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl CredentialStore for FakeCredentialStore {
    async fn lookup(&self, identifier: &str, secret: &[u8]) -> Result<User, AuthError> {
        let users = self.users.lock().unwrap();
        let user = users
            .iter()
            .find(|u| u.identifier == identifier)
            .ok_or(AuthError::UserNotFound)?;

        if user.secret == secret {
            Ok(user.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// User cache whose reads and deletes fail with `CacheUnavailable`,
/// modelling a backend that went down after login wrote its entry.
#[derive(Clone, Default)]
pub struct FailingUserCache;

impl FailingUserCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserCache for FailingUserCache {
    async fn set_with_expiry(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), AuthError> {
        Ok(())
    }

    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, AuthError> {
        Err(AuthError::CacheUnavailable("cache is down".to_owned()))
    }

    async fn delete(&self, _key: &str) -> Result<(), AuthError> {
        Err(AuthError::CacheUnavailable("cache is down".to_owned()))
    }
}

/// Plays a `Set-Cookie` response value back as a request `Cookie`
/// header, the way a browser would on the next request.
pub fn replay_set_cookie(set_cookie: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let raw = set_cookie.to_str().unwrap();
    let pair = raw.split(';').next().unwrap();
    headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
    headers
}
