use async_trait::async_trait;

use crate::{AuthError, User};

/// Durable store of identity records; the source of truth for login.
///
/// The gateway passes credentials through untouched: hashing,
/// normalization and comparison policy all live behind this trait.
/// The in-memory mock (behind the `mocks` feature) stands in for a
/// database in tests and examples.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Resolves `(identifier, secret)` to a user record.
    ///
    /// # Errors
    ///
    /// `AuthError::UserNotFound` when no record exists,
    /// `AuthError::InvalidCredentials` when the secret does not match,
    /// `AuthError::DatabaseError` on store failure. Implementations
    /// may collapse the first two to avoid leaking which part failed.
    async fn lookup(&self, identifier: &str, secret: &[u8]) -> Result<User, AuthError>;
}
