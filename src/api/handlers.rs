//! HTTP handlers for the session endpoints.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use super::error::AppError;
use super::middleware::SessionUser;
use super::routes::AppState;
use super::types::{LoginRequest, MessageResponse, UserResponse};
use crate::{CredentialStore, UserCache};

/// Validate credentials and establish a session.
///
/// POST /login
pub async fn login<C, K>(
    State(state): State<AppState<C, K>>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    C: CredentialStore + 'static,
    K: UserCache + 'static,
{
    let (user, set_cookie) = state
        .gateway
        .authenticate(&headers, &body.identifier, body.secret.as_bytes())
        .await?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, set_cookie)],
        Json(UserResponse::from(user)),
    ))
}

/// End the current session. Succeeds whether or not one was active.
///
/// POST /logout
pub async fn logout<C, K>(
    State(state): State<AppState<C, K>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    C: CredentialStore + 'static,
    K: UserCache + 'static,
{
    let set_cookie = state.gateway.clear_user(&headers).await?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, set_cookie)],
        Json(MessageResponse {
            message: "logged out".to_owned(),
        }),
    ))
}

/// Return the authenticated user. Sits behind
/// [`require_session`](super::require_session).
///
/// GET /me
pub async fn me(user: SessionUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.into_inner()))
}
