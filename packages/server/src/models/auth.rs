use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::AppError;

/// Request body for signing in.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "owner@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if !payload.email.trim().validate_email() {
        return Err(AppError::Validation("Invalid email address.".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful sign-in. The same token is also set as the session cookie.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Signed session token (JWT).
    #[schema(example = "eyJhbGciOiJIUzI1NiIs...")]
    pub token: String,
    #[schema(example = "owner@example.com")]
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
    /// Seconds until the session expires.
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// The current session.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    #[schema(example = "owner@example.com")]
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
}
