//! The identity record moved between the credential store, the user
//! cache and the request context.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AuthError;

/// An authenticated identity.
///
/// `identifier` is the stable unique handle (typically an email) and
/// seeds the cache-key derivation. `secret` is the opaque credential
/// material the store compared during validation; it travels inside
/// the serialized cache blob but is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub identifier: String,
    #[serde(with = "secret_bytes")]
    pub secret: Vec<u8>,
}

impl User {
    pub fn new(identifier: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Serializes the record for cache storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AuthError> {
        serde_json::to_vec(self).map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Decodes a record previously written with [`User::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CorruptSession` on malformed bytes; a blob
    /// that does not round-trip means the session cannot be trusted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(bytes).map_err(|_| AuthError::CorruptSession)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock() -> Self {
        User::new("test@example.com", b"fakesecret".to_vec())
    }

    pub fn mock_from_identifier(identifier: &str) -> Self {
        User::new(identifier, b"fakesecret".to_vec())
    }
}

/// Base64 encoding for the secret bytes so the JSON blob stays valid
/// UTF-8 regardless of the credential material.
mod secret_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
    }
}
