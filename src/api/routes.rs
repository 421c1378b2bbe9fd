use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};

use super::handlers;
use super::middleware::require_session;
use crate::{AuthGateway, CredentialStore, UserCache};

/// Shared state for the session routes: one gateway per application.
pub struct AppState<C, K> {
    pub gateway: Arc<AuthGateway<C, K>>,
}

impl<C, K> AppState<C, K> {
    pub fn new(gateway: AuthGateway<C, K>) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

// manual impl: C and K need not be Clone themselves
impl<C, K> Clone for AppState<C, K> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Builds the session router: public `/login` and `/logout`, plus
/// `/me` behind the session gate.
///
/// Mount it under your application router and protect your own routes
/// by layering [`require_session`] the same way.
pub fn auth_routes<C, K>(state: AppState<C, K>) -> Router
where
    C: CredentialStore + 'static,
    K: UserCache + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<C, K>,
        ));

    Router::new()
        .route("/login", post(handlers::login::<C, K>))
        .route("/logout", post(handlers::logout::<C, K>))
        .merge(protected)
        .with_state(state)
}
