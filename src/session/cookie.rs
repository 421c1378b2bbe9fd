//! Signed cookie payload helpers.
//!
//! The session's slot map is serialized, base64url-encoded and signed
//! with HMAC-SHA256, producing a tamper-proof `{payload}.{signature}`
//! cookie value. The browser holds the whole container; the server
//! holds only the signing key.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// Signs a serialized payload, returning the cookie value
/// `{base64url(payload)}.{hex(hmac)}`.
pub fn sign_payload(payload: &[u8], secret: &SecretString) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    let signature = compute_hmac(encoded.as_bytes(), secret.expose_secret().as_bytes());
    format!("{}.{}", encoded, hex::encode(signature))
}

/// Verifies a cookie value and returns the original payload bytes.
///
/// Returns `None` on a missing separator, a bad signature or an
/// undecodable payload. Callers treat `None` as "no session".
pub fn verify_signed_payload(cookie_value: &str, secret: &SecretString) -> Option<Vec<u8>> {
    let (encoded, signature_hex) = cookie_value.rsplit_once('.')?;

    let actual_sig = hex::decode(signature_hex).ok()?;
    let expected_sig = compute_hmac(encoded.as_bytes(), secret.expose_secret().as_bytes());

    if !constant_time_eq(&expected_sig, &actual_sig) {
        log::warn!(
            target: "gatehouse::session",
            "msg=\"session cookie tampered\" cookie_prefix=\"{}...\"",
            &cookie_value.chars().take(8).collect::<String>()
        );
        return None;
    }

    URL_SAFE_NO_PAD.decode(encoded).ok()
}

/// Computes HMAC-SHA256.
///
/// # Panics
///
/// Cannot panic: HMAC-SHA256 accepts keys of any length.
fn compute_hmac(message: &[u8], key: &[u8]) -> Vec<u8> {
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let secret = SecretString::new("test-secret-key-that-is-long-enough");
        let payload = br#"{"slot":"cachekey"}"#;

        let signed = sign_payload(payload, &secret);
        let verified = verify_signed_payload(&signed, &secret);

        assert_eq!(verified.as_deref(), Some(payload.as_slice()));
    }

    #[test]
    fn test_tampered_signature() {
        let secret = SecretString::new("test-secret-key-that-is-long-enough");
        let signed = sign_payload(b"payload", &secret);
        let encoded = signed.rsplit_once('.').unwrap().0;

        let tampered = format!("{}.{}", encoded, "0".repeat(64));
        assert!(verify_signed_payload(&tampered, &secret).is_none());
    }

    #[test]
    fn test_tampered_payload() {
        let secret = SecretString::new("test-secret-key-that-is-long-enough");
        let signed = sign_payload(b"payload", &secret);
        let signature = signed.rsplit_once('.').unwrap().1;

        let other = URL_SAFE_NO_PAD.encode(b"different");
        let tampered = format!("{other}.{signature}");
        assert!(verify_signed_payload(&tampered, &secret).is_none());
    }

    #[test]
    fn test_wrong_secret() {
        let secret1 = SecretString::new("secret-key-one-that-is-long-enough");
        let secret2 = SecretString::new("secret-key-two-that-is-long-enough");

        let signed = sign_payload(b"payload", &secret1);
        assert!(verify_signed_payload(&signed, &secret2).is_none());
    }

    #[test]
    fn test_malformed_values() {
        let secret = SecretString::new("test-secret-key-that-is-long-enough");

        // no separator
        assert!(verify_signed_payload("noseparator", &secret).is_none());
        // signature is not hex
        assert!(verify_signed_payload("cGF5bG9hZA.nothex", &secret).is_none());
        // empty value
        assert!(verify_signed_payload("", &secret).is_none());
    }

    #[test]
    fn test_binary_payload_survives_encoding() {
        let secret = SecretString::new("test-secret-key-that-is-long-enough");
        let payload = [0u8, 255, 1, 128, 46, 46];

        let signed = sign_payload(&payload, &secret);
        assert_eq!(verify_signed_payload(&signed, &secret).unwrap(), payload);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hello!"));
        assert!(constant_time_eq(b"", b""));
    }
}
