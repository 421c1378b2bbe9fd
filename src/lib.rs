//! Session-authenticated request gateway.
//!
//! `gatehouse` authenticates HTTP requests with a three-tier scheme:
//! an opaque signed session cookie held by the browser, a TTL-bound
//! key-value cache holding serialized [`User`] records under a derived
//! lookup key, and a durable [`CredentialStore`] that validates
//! `(identifier, secret)` pairs on login.
//!
//! The orchestrating type is [`AuthGateway`], which exposes
//! `authenticate`, `current_user` and `clear_user`, plus (behind the
//! `axum` feature) a request middleware that attaches the
//! authenticated user to the request and rejects with 401 otherwise.

#[cfg(feature = "axum")]
pub mod api;
pub mod cache;
pub mod config;
pub mod crypto;
pub mod gateway;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod repository;
mod secret;
pub mod session;
pub mod user;

pub use cache::{InMemoryUserCache, UserCache};
pub use config::GatewayConfig;
pub use gateway::AuthGateway;
pub use repository::CredentialStore;
pub use secret::SecretString;
pub use session::{Session, SessionConfig};
pub use user::User;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockCredentialStore;

use std::fmt;

/// Errors produced by the gateway and its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The OS entropy source failed; fatal at gateway construction.
    KeyGeneration(String),
    /// No credential record exists for the identifier.
    UserNotFound,
    /// The identifier exists but the secret did not match.
    InvalidCredentials,
    /// The request carried no session slot for this gateway.
    NoActiveSession,
    /// The session's cache entry expired or was evicted.
    SessionExpired,
    /// The cached user blob could not be decoded.
    CorruptSession,
    /// The cache backend could not be reached.
    CacheUnavailable(String),
    /// The session cookie could not be rendered.
    SessionWrite(String),
    DatabaseError(String),
    Internal(String),
}

impl AuthError {
    /// True for failures that mean "this request is not authenticated"
    /// rather than an infrastructure fault. The middleware answers 401
    /// either way; the distinction only drives log levels.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::UserNotFound
                | AuthError::InvalidCredentials
                | AuthError::NoActiveSession
                | AuthError::SessionExpired
                | AuthError::CorruptSession
        )
    }
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::KeyGeneration(msg) => write!(f, "Key generation failed: {}", msg),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::InvalidCredentials => write!(f, "Invalid identifier or secret"),
            AuthError::NoActiveSession => write!(f, "No active session"),
            AuthError::SessionExpired => write!(f, "Session has expired"),
            AuthError::CorruptSession => write!(f, "Session data is corrupt"),
            AuthError::CacheUnavailable(msg) => write!(f, "Cache unavailable: {}", msg),
            AuthError::SessionWrite(msg) => write!(f, "Failed to write session: {}", msg),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}
