use serde::{Deserialize, Serialize};

use crate::{AuthError, User};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

// Response DTOs

/// Public view of a user; the secret never leaves the gateway.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub identifier: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            identifier: user.identifier,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
