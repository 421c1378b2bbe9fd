//! Key generation and cache-key derivation.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::{AuthError, SecretString};

/// Number of random bytes in a generated key (256 bits).
pub const KEY_BYTES: usize = 32;

/// Generates an opaque key from the OS entropy source, hex-encoded.
///
/// Used at gateway construction for the cookie-signing secret, the
/// session value-slot name and the cache namespace secret.
///
/// # Errors
///
/// Returns `AuthError::KeyGeneration` when the entropy source fails.
/// The gateway treats this as fatal: no keys, no gateway.
pub fn generate_key() -> Result<String, AuthError> {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::KeyGeneration(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Derives the cache lookup key for a user.
///
/// The format is part of the cache wire contract:
/// `<secret>:user:<identifier>`. The secret namespaces entries so that
/// two gateway instances sharing one cache never read each other's
/// records.
pub fn derive_cache_key(secret: &SecretString, identifier: &str) -> String {
    format!("{}:user:{}", secret.expose_secret(), identifier)
}
