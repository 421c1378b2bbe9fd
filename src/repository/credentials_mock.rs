#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{AuthError, User};

use super::credentials::CredentialStore;

/// In-memory credential store for tests and examples.
///
/// Secrets are compared byte-for-byte; real deployments put their
/// comparison policy behind [`CredentialStore`] instead.
#[derive(Clone, Default)]
pub struct MockCredentialStore {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(identifier: &str, secret: &[u8]) -> Self {
        let store = Self::new();
        store.add(User::new(identifier, secret.to_vec()));
        store
    }

    pub fn add(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
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
