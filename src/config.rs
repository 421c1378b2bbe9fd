//! Gateway and cache configuration.
//!
//! Everything is deserializable with serde so deployments can load it
//! from a config file; in-code construction uses `Default` plus struct
//! update syntax.

use chrono::Duration;
use serde::Deserialize;

use crate::session::SessionConfig;
use crate::SecretString;

/// Configuration owned by one [`AuthGateway`](crate::AuthGateway)
/// instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Cookie attributes and signing key.
    pub session: SessionConfig,

    /// How long a cached user record stays resolvable. After this the
    /// entry is indistinguishable from one never written.
    ///
    /// Default: 2 hours
    #[serde(with = "duration_seconds")]
    pub cache_ttl: Duration,

    /// Where unauthenticated browsers should be sent.
    ///
    /// Default: `/login`
    pub redirect_uri: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            cache_ttl: Duration::hours(2),
            redirect_uri: "/login".to_owned(),
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short-lived sessions for development against a local cache.
    pub fn development() -> Self {
        Self {
            session: SessionConfig {
                cookie_secure: false,
                lifetime: Duration::hours(24),
                ..SessionConfig::default()
            },
            cache_ttl: Duration::hours(24),
            redirect_uri: "/login".to_owned(),
        }
    }
}

/// Connection settings for the user cache backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache endpoint, e.g. `redis://127.0.0.1:6379`.
    pub url: String,

    /// Optional AUTH credential.
    pub password: Option<SecretString>,

    /// Optional logical database selector.
    pub database: Option<i64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_owned(),
            password: None,
            database: None,
        }
    }
}

impl CacheConfig {
    /// Renders the connection URL with credential and database applied.
    pub fn connection_url(&self) -> String {
        let mut url = self.url.clone();
        if let Some(password) = &self.password {
            if let Some(rest) = url.strip_prefix("redis://") {
                url = format!("redis://:{}@{}", password.expose_secret(), rest);
            }
        }
        if let Some(database) = self.database {
            if !url.ends_with('/') {
                url.push('/');
            }
            url.push_str(&database.to_string());
        }
        url
    }
}

/// Serde helper: durations as whole seconds in config files.
pub(crate) mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Ok(Duration::seconds(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.cache_ttl, Duration::hours(2));
        assert_eq!(config.redirect_uri, "/login");
        assert!(config.session.cookie_secure);
    }

    #[test]
    fn test_development_config() {
        let config = GatewayConfig::development();
        assert!(!config.session.cookie_secure);
        assert_eq!(config.cache_ttl, Duration::hours(24));
    }

    #[test]
    fn test_deserialize_from_file_shape() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{
                "session": {"cookie_name": "media_session", "lifetime": 7200},
                "cache_ttl": 600,
                "redirect_uri": "/signin"
            }"#,
        )
        .unwrap();
        assert_eq!(config.session.cookie_name, "media_session");
        assert_eq!(config.cache_ttl, Duration::minutes(10));
        assert_eq!(config.redirect_uri, "/signin");
    }

    #[test]
    fn test_cache_connection_url() {
        let plain = CacheConfig::default();
        assert_eq!(plain.connection_url(), "redis://127.0.0.1:6379");

        let full = CacheConfig {
            url: "redis://cache.internal:6379".to_owned(),
            password: Some(SecretString::new("hunter2")),
            database: Some(3),
        };
        assert_eq!(
            full.connection_url(),
            "redis://:hunter2@cache.internal:6379/3"
        );
    }
}
