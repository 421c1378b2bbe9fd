//! End-to-end gateway properties, exercised against local fakes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use http::HeaderMap;

use common::{replay_set_cookie, FailingUserCache, FakeCredentialStore};
use gatehouse::{AuthError, AuthGateway, GatewayConfig, InMemoryUserCache, User};

fn gateway_with_users(
    users: &[(&str, &[u8])],
) -> AuthGateway<FakeCredentialStore, InMemoryUserCache> {
    AuthGateway::new(
        FakeCredentialStore::with_users(users),
        InMemoryUserCache::new(),
        GatewayConfig::default(),
    )
    .unwrap()
}

// =============================================================================
// Login / lookup round trip
// =============================================================================

#[tokio::test]
async fn authenticate_then_current_user_returns_same_identifier() {
    let gateway = gateway_with_users(&[("a@x.com", b"p")]);

    let (user, set_cookie) = gateway
        .authenticate(&HeaderMap::new(), "a@x.com", b"p")
        .await
        .unwrap();
    assert_eq!(user.identifier, "a@x.com");

    let next_request = replay_set_cookie(&set_cookie);
    let current = gateway.current_user(&next_request).await.unwrap();
    assert_eq!(current.identifier, "a@x.com");
}

#[tokio::test]
async fn round_trip_works_for_empty_secret() {
    let gateway = gateway_with_users(&[("empty@x.com", b"")]);

    let (_, set_cookie) = gateway
        .authenticate(&HeaderMap::new(), "empty@x.com", b"")
        .await
        .unwrap();

    let current = gateway
        .current_user(&replay_set_cookie(&set_cookie))
        .await
        .unwrap();
    assert_eq!(current.identifier, "empty@x.com");
    assert!(current.secret.is_empty());
}

#[tokio::test]
async fn credential_rejections_pass_through() {
    let gateway = gateway_with_users(&[("a@x.com", b"p")]);

    assert_eq!(
        gateway
            .authenticate(&HeaderMap::new(), "a@x.com", b"wrong")
            .await
            .unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        gateway
            .authenticate(&HeaderMap::new(), "nobody@x.com", b"p")
            .await
            .unwrap_err(),
        AuthError::UserNotFound
    );
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn clear_user_then_current_user_always_fails() {
    let gateway = gateway_with_users(&[("a@x.com", b"p")]);

    let (_, login_cookie) = gateway
        .authenticate(&HeaderMap::new(), "a@x.com", b"p")
        .await
        .unwrap();
    let logged_in = replay_set_cookie(&login_cookie);

    let clear_cookie = gateway.clear_user(&logged_in).await.unwrap();
    let logged_out = replay_set_cookie(&clear_cookie);

    let result = gateway.current_user(&logged_out).await;
    assert!(result.unwrap_err().is_rejection());
}

#[tokio::test]
async fn clear_user_twice_succeeds_both_times() {
    let gateway = gateway_with_users(&[("a@x.com", b"p")]);

    let (_, login_cookie) = gateway
        .authenticate(&HeaderMap::new(), "a@x.com", b"p")
        .await
        .unwrap();
    let logged_in = replay_set_cookie(&login_cookie);

    let first = gateway.clear_user(&logged_in).await.unwrap();
    let after_first = replay_set_cookie(&first);
    assert!(gateway.clear_user(&after_first).await.is_ok());

    // and even with no cookie at all
    assert!(gateway.clear_user(&HeaderMap::new()).await.is_ok());
}

#[tokio::test]
async fn clear_user_returns_removal_cookie_despite_delete_failure() {
    let gateway = AuthGateway::new(
        FakeCredentialStore::with_users(&[("a@x.com", b"p")]),
        FailingUserCache::new(),
        GatewayConfig::default(),
    )
    .unwrap();

    let (_, login_cookie) = gateway
        .authenticate(&HeaderMap::new(), "a@x.com", b"p")
        .await
        .unwrap();
    let headers = replay_set_cookie(&login_cookie);

    // the backend refuses the delete; logout still lands and the
    // browser-side cookie removal goes out
    let clear_cookie = gateway.clear_user(&headers).await.unwrap();
    assert!(clear_cookie.to_str().unwrap().contains("Max-Age=0"));
}

// =============================================================================
// TTL
// =============================================================================

#[tokio::test]
async fn expired_entry_is_indistinguishable_from_never_written() {
    let gateway = AuthGateway::new(
        FakeCredentialStore::with_users(&[("a@x.com", b"p")]),
        InMemoryUserCache::new(),
        GatewayConfig {
            cache_ttl: Duration::milliseconds(10),
            ..GatewayConfig::default()
        },
    )
    .unwrap();

    let (_, set_cookie) = gateway
        .authenticate(&HeaderMap::new(), "a@x.com", b"p")
        .await
        .unwrap();
    let headers = replay_set_cookie(&set_cookie);

    tokio::time::sleep(std::time::Duration::from_millis(25)).await;

    assert_eq!(
        gateway.current_user(&headers).await.unwrap_err(),
        AuthError::SessionExpired
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_logins_produce_independent_sessions() {
    const N: usize = 16;

    let store = FakeCredentialStore::new();
    for i in 0..N {
        store.add(User::new(format!("user{i}@x.com"), b"p".to_vec()));
    }
    let cache = InMemoryUserCache::new();
    let gateway =
        Arc::new(AuthGateway::new(store, cache.clone(), GatewayConfig::default()).unwrap());

    let mut handles = Vec::with_capacity(N);
    for i in 0..N {
        let gateway = Arc::clone(&gateway);
        handles.push(tokio::spawn(async move {
            let identifier = format!("user{i}@x.com");
            let (user, set_cookie) = gateway
                .authenticate(&HeaderMap::new(), &identifier, b"p")
                .await
                .unwrap();
            assert_eq!(user.identifier, identifier);

            let current = gateway
                .current_user(&replay_set_cookie(&set_cookie))
                .await
                .unwrap();
            current.identifier
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        assert!(seen.insert(handle.await.unwrap()));
    }

    // one cache entry per identifier, none colliding
    assert_eq!(seen.len(), N);
    assert_eq!(cache.len(), N);
}
