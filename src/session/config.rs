use chrono::Duration;
use serde::Deserialize;

use crate::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    None,
    Lax,
    #[default]
    Strict,
}

impl SameSite {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }
}

/// Cookie attributes and signing key for the session container.
///
/// An empty `secret_key` tells the gateway to generate one at
/// construction; supply a fixed key when sessions must survive a
/// process restart.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    /// Cookie lifetime; rendered as `Max-Age`.
    #[serde(with = "crate::config::duration_seconds")]
    pub lifetime: Duration,
    pub secret_key: SecretString,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "gatehouse_session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_domain: None,
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Strict,
            lifetime: Duration::hours(2),
            secret_key: SecretString::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.secret_key.is_empty() && self.secret_key.len() < 32 {
            return Err("secret_key should be at least 32 bytes");
        }
        if self.cookie_name.is_empty() {
            return Err("cookie_name must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "gatehouse_session");
        assert_eq!(config.cookie_path, "/");
        assert!(config.cookie_secure);
        assert!(config.cookie_http_only);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        // empty key means "generate at construction"
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_short_secret() {
        let config = SessionConfig {
            secret_key: SecretString::new("short"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_explicit_secret() {
        let config = SessionConfig {
            secret_key: SecretString::new("this-is-a-very-long-secret-key-for-testing"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_config_file() {
        let config: SessionConfig = serde_json::from_str(
            r#"{"cookie_name": "media_session", "cookie_secure": false, "lifetime": 3600}"#,
        )
        .unwrap();
        assert_eq!(config.cookie_name, "media_session");
        assert!(!config.cookie_secure);
        assert_eq!(config.lifetime, Duration::hours(1));
    }
}
