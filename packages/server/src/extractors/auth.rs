use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::entity::profile;
use crate::error::AppError;
use crate::repo;
use crate::state::AppState;
use crate::utils::jwt;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "venus_session";

/// A signed-in profile, read from the `venus_session` cookie or an
/// `Authorization: Bearer <token>` header.
pub struct SessionUser {
    pub profile_id: Uuid,
    pub email: String,
    pub role: String,
}

/// A signed-in profile holding the `admin` role.
///
/// Add this as a handler parameter to guard an admin endpoint.
pub struct AdminUser(pub SessionUser);

/// Rejection for the auth extractors.
///
/// API clients get the JSON error body; browsers (`Accept: text/html`) are
/// sent to the login or unauthorized page instead.
pub struct AuthRejection {
    error: AppError,
    redirect: Option<String>,
}

impl AuthRejection {
    fn new(error: AppError, parts: &Parts) -> Self {
        let redirect = match error {
            _ if !wants_html(&parts.headers) => None,
            AppError::PermissionDenied => Some("/unauthorized".to_string()),
            AppError::TokenMissing | AppError::TokenInvalid => Some(login_redirect(parts)),
            _ => None,
        };
        Self { error, redirect }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self.redirect {
            Some(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
            None => self.error.into_response(),
        }
    }
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn login_redirect(parts: &Parts) -> String {
    // Nested routers see a stripped URI; the original is kept in extensions.
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map_or(&parts.uri, |original| &original.0);
    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!("/login?next={encoded}")
}

/// Pull the raw session token from the request, preferring the header.
fn session_token(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AppError::TokenInvalid)?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;
        return Ok(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::TokenMissing)
}

async fn resolve_session(parts: &Parts, state: &AppState) -> Result<SessionUser, AppError> {
    let token = session_token(&parts.headers)?;
    let claims =
        jwt::verify(&token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

    // The profile row is authoritative for the role; a deleted profile ends the session.
    let profile = repo::profile::find_by_id(&state.db, claims.uid)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    Ok(SessionUser {
        profile_id: profile.id,
        email: profile.email,
        role: profile.role,
    })
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .await
            .map_err(|e| AuthRejection::new(e, parts))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = SessionUser::from_request_parts(parts, state).await?;
        if user.role != profile::ADMIN_ROLE {
            tracing::warn!(email = %user.email, role = %user.role, "Admin access denied");
            return Err(AuthRejection::new(AppError::PermissionDenied, parts));
        }
        Ok(AdminUser(user))
    }
}
