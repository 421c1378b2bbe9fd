//! Cookie session container.
//!
//! A [`Session`] is a small map of named string slots carried in a
//! single HMAC-signed cookie. The gateway uses exactly one slot, which
//! holds the user-cache lookup key.
//!
//! Opening a session never fails: a request with no cookie, a bad
//! signature or an undecodable payload yields a fresh empty session.
//! Only rendering the cookie for the response can error.

mod config;
mod cookie;

use std::collections::HashMap;

use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};

pub use config::{SameSite, SessionConfig};
pub use cookie::{sign_payload, verify_signed_payload};

use crate::AuthError;

/// A per-request session backed by one signed cookie.
///
/// The container is request-local; no two requests share an instance.
/// Mutations only reach the browser once [`Session::to_set_cookie`] is
/// applied to the response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    values: HashMap<String, String>,
}

impl Session {
    /// Opens the session carried by `headers`, or a fresh empty one.
    pub fn open(headers: &HeaderMap, config: &SessionConfig) -> Self {
        let Some(cookie_value) = find_cookie(headers, &config.cookie_name) else {
            return Session::default();
        };

        let Some(payload) = verify_signed_payload(&cookie_value, &config.secret_key) else {
            return Session::default();
        };

        match serde_json::from_slice::<HashMap<String, String>>(&payload) {
            Ok(values) => Session { values },
            Err(_) => {
                log::warn!(
                    target: "gatehouse::session",
                    "msg=\"signed session payload did not decode, starting fresh\""
                );
                Session::default()
            }
        }
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.values.get(slot).map(String::as_str)
    }

    pub fn set(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        self.values.insert(slot.into(), value.into());
    }

    pub fn remove(&mut self, slot: &str) -> Option<String> {
        self.values.remove(slot)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the `Set-Cookie` header persisting this session.
    ///
    /// An empty session renders a removal cookie (`Max-Age=0`) so the
    /// browser drops it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionWrite` when the payload cannot be
    /// serialized or the rendered value is not a valid header.
    pub fn to_set_cookie(&self, config: &SessionConfig) -> Result<HeaderValue, AuthError> {
        let (value, max_age) = if self.values.is_empty() {
            (String::new(), 0)
        } else {
            let payload = serde_json::to_vec(&self.values)
                .map_err(|e| AuthError::SessionWrite(e.to_string()))?;
            (
                sign_payload(&payload, &config.secret_key),
                config.lifetime.num_seconds().max(0),
            )
        };

        let mut rendered = format!(
            "{}={}; Path={}; Max-Age={}; SameSite={}",
            config.cookie_name,
            value,
            config.cookie_path,
            max_age,
            config.cookie_same_site.as_str(),
        );
        if let Some(domain) = &config.cookie_domain {
            rendered.push_str("; Domain=");
            rendered.push_str(domain);
        }
        if config.cookie_http_only {
            rendered.push_str("; HttpOnly");
        }
        if config.cookie_secure {
            rendered.push_str("; Secure");
        }

        HeaderValue::from_str(&rendered).map_err(|e| AuthError::SessionWrite(e.to_string()))
    }
}

/// Extracts a named cookie from the request's `Cookie` headers.
fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((cookie_name, value)) = pair.trim().split_once('=') {
                if cookie_name == name {
                    return Some(value.to_owned());
                }
            }
        }
    }
    None
}

/// Copies a `Set-Cookie` response value into a request `Cookie` header.
///
/// Test helper for replaying a login response's cookie on the next
/// request, the way a browser would.
#[cfg(any(test, feature = "mocks"))]
pub fn replay_set_cookie(set_cookie: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(raw) = set_cookie.to_str() {
        if let Some(pair) = raw.split(';').next() {
            if let Ok(value) = HeaderValue::from_str(pair) {
                headers.insert(COOKIE, value);
            }
        }
    }
    headers
}
