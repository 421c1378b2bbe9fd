//! Session middleware: the strict 401 gate in front of handlers.

use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRequestParts, Json};

use super::error::AppError;
use super::routes::AppState;
use super::types::ErrorResponse;
use crate::{AuthError, CredentialStore, User, UserCache};

/// The authenticated user attached to a request that passed
/// [`require_session`].
///
/// Stored in request extensions under this type: a private,
/// collision-free key, never a bare string. Use it as a handler
/// extractor:
///
/// ```ignore
/// async fn me(user: SessionUser) -> Json<UserResponse> {
///     Json(UserResponse::from(user.into_inner()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser(User);

impl SessionUser {
    pub fn into_inner(self) -> User {
        self.0
    }

    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn identifier(&self) -> &str {
        &self.0.identifier
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or(AppError(AuthError::NoActiveSession))
    }
}

/// Resolves the request's session and either attaches the user or
/// short-circuits with 401.
///
/// This is a strict gate: the downstream handler is never invoked on
/// failure, and every failure class (missing cookie, expired cache
/// entry, corrupt blob, cache outage) produces the same 401. The
/// classes are distinguished only in logs.
///
/// Wire it with `axum::middleware::from_fn_with_state`.
pub async fn require_session<C, K>(
    State(state): State<AppState<C, K>>,
    mut request: Request,
    next: Next,
) -> Response
where
    C: CredentialStore + 'static,
    K: UserCache + 'static,
{
    match state.gateway.current_user(request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(SessionUser(user));
            next.run(request).await
        }
        Err(err) => {
            if err.is_rejection() {
                log::debug!(
                    target: "gatehouse::middleware",
                    "msg=\"request rejected\" reason=\"{err}\""
                );
            } else {
                log::warn!(
                    target: "gatehouse::middleware",
                    "msg=\"authentication unavailable\" error=\"{err}\""
                );
            }

            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "unauthorized".to_owned(),
                }),
            )
                .into_response()
        }
    }
}
