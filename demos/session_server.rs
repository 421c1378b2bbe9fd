#![allow(clippy::print_stdout, clippy::unwrap_used, clippy::expect_used)]

//! Cookie-session gateway demo.
//!
//! Run with: `cargo run --example session_server --features "axum mocks"`
//!
//! Test endpoints:
//!   curl -X POST http://localhost:8080/login \
//!     -H "Content-Type: application/json" \
//!     -d '{"identifier": "user@example.com", "secret": "p"}' \
//!     -c cookies.txt
//!
//!   curl http://localhost:8080/me -b cookies.txt
//!
//!   curl -X POST http://localhost:8080/logout -b cookies.txt -c cookies.txt

use gatehouse::api::{auth_routes, AppState};
use gatehouse::{AuthGateway, GatewayConfig, InMemoryUserCache, MockCredentialStore};

#[tokio::main]
async fn main() {
    let store = MockCredentialStore::with_user("user@example.com", b"p");
    let cache = InMemoryUserCache::new();

    // development config: plain HTTP, long-lived sessions
    let gateway = AuthGateway::new(store, cache, GatewayConfig::development())
        .expect("entropy source available");

    let app = auth_routes(AppState::new(gateway));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();
    println!("listening on http://127.0.0.1:8080");
    axum::serve(listener, app).await.unwrap();
}
