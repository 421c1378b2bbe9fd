//! Axum surface: middleware, handlers and routes.

mod error;
mod handlers;
mod middleware;
mod routes;
mod types;

pub use error::AppError;
pub use handlers::{login, logout, me};
pub use middleware::{require_session, SessionUser};
pub use routes::{auth_routes, AppState};
pub use types::{ErrorResponse, LoginRequest, MessageResponse, UserResponse};
