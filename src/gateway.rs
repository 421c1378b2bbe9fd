//! The session-authenticated gateway.

use http::{HeaderMap, HeaderValue};

use crate::cache::UserCache;
use crate::config::GatewayConfig;
use crate::crypto::{derive_cache_key, generate_key};
use crate::repository::CredentialStore;
use crate::session::Session;
use crate::{AuthError, SecretString, User};

/// Orchestrates the credential store, the user cache and the cookie
/// session container into login, per-request lookup and logout.
///
/// Collaborators are injected at construction behind narrow traits, so
/// tests can substitute in-memory fakes. Each instance owns its own
/// generated secrets; two gateways never see each other's sessions or
/// cache entries even when they share a cache.
///
/// All state here is established once and read-only afterwards, so the
/// gateway is freely shareable across request tasks without locks.
pub struct AuthGateway<C, K> {
    credentials: C,
    cache: K,
    /// Namespaces cache keys; never the user's own secret.
    cache_secret: SecretString,
    /// Name of the single session slot holding the cache lookup key.
    session_slot: String,
    config: GatewayConfig,
}

impl<C, K> AuthGateway<C, K>
where
    C: CredentialStore,
    K: UserCache,
{
    /// Builds a gateway, generating the cookie-signing secret (when
    /// configuration left it empty), the session slot name and the
    /// cache namespace secret.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::KeyGeneration` when the entropy source
    /// fails. Fatal: there is no degraded mode without secrets.
    pub fn new(credentials: C, cache: K, mut config: GatewayConfig) -> Result<Self, AuthError> {
        if let Err(reason) = config.session.validate() {
            return Err(AuthError::Internal(reason.to_owned()));
        }
        if config.session.secret_key.is_empty() {
            config.session.secret_key = SecretString::new(generate_key()?);
        }

        Ok(Self {
            credentials,
            cache,
            cache_secret: SecretString::new(generate_key()?),
            session_slot: generate_key()?,
            config,
        })
    }

    /// The URI unauthenticated browsers should be redirected to.
    pub fn redirect_uri(&self) -> &str {
        &self.config.redirect_uri
    }

    /// Validates credentials and establishes a session.
    ///
    /// On success the user record is cached under its derived key for
    /// the configured TTL and the returned `Set-Cookie` value carries
    /// the signed session holding that key; apply it to the response.
    /// A repeated login for the same identifier overwrites the cache
    /// entry rather than duplicating it.
    ///
    /// # Errors
    ///
    /// Credential rejections propagate as-is; `CacheUnavailable` and
    /// `SessionWrite` surface to the caller, which may retry. A failed
    /// cookie write after a successful cache write leaves a TTL-bound
    /// orphan entry; it is worth logging at the call site.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "authenticate", skip_all, err)
    )]
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
        identifier: &str,
        secret: &[u8],
    ) -> Result<(User, HeaderValue), AuthError> {
        let user = self.credentials.lookup(identifier, secret).await?;

        let cache_key = derive_cache_key(&self.cache_secret, &user.identifier);
        self.cache
            .set_with_expiry(&cache_key, user.to_bytes()?, self.config.cache_ttl)
            .await?;

        let mut session = Session::open(headers, &self.config.session);
        session.set(&self.session_slot, &cache_key);
        let set_cookie = session.to_set_cookie(&self.config.session)?;

        log::debug!(
            target: "gatehouse::gateway",
            "msg=\"session established\" identifier=\"{}\"",
            user.identifier
        );

        Ok((user, set_cookie))
    }

    /// Resolves the request's session to its user.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` when the request carries no slot for this
    /// gateway, `SessionExpired` when the cache entry lapsed or was
    /// evicted, `CorruptSession` when the blob does not decode, and
    /// `CacheUnavailable` on backend outage.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "current_user", skip_all, err)
    )]
    pub async fn current_user(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        let session = Session::open(headers, &self.config.session);
        let cache_key = session
            .get(&self.session_slot)
            .ok_or(AuthError::NoActiveSession)?;

        let bytes = self
            .cache
            .get(cache_key)
            .await?
            .ok_or(AuthError::SessionExpired)?;

        User::from_bytes(&bytes)
    }

    /// Ends the request's session: drops the slot, renders a removal
    /// cookie, and best-effort deletes the cache entry.
    ///
    /// Idempotent: clearing when no session is active still succeeds
    /// and still returns a removal cookie. A cache-delete failure is
    /// logged but does not fail the logout: the browser-side cookie
    /// removal is the authoritative effect and the orphan entry dies
    /// by TTL. Nothing already done is rolled back.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clear_user", skip_all, err)
    )]
    pub async fn clear_user(&self, headers: &HeaderMap) -> Result<HeaderValue, AuthError> {
        let mut session = Session::open(headers, &self.config.session);
        let cache_key = session.remove(&self.session_slot);

        let set_cookie = session.to_set_cookie(&self.config.session)?;

        if let Some(cache_key) = cache_key {
            if let Err(err) = self.cache.delete(&cache_key).await {
                log::warn!(
                    target: "gatehouse::gateway",
                    "msg=\"cache delete failed during logout, entry expires by TTL\" error=\"{err}\""
                );
            }
        }

        Ok(set_cookie)
    }
}
