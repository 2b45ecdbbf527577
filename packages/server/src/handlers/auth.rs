use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{SESSION_COOKIE, SessionUser};
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, MeResponse, validate_login_request};
use crate::models::shared::StatusResponse;
use crate::repo;
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Sign in",
    description = "Verifies the email and password against the stored profile. On success the \
        session token is returned and also set as the `venus_session` cookie. Attempts are \
        limited per email.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid credentials (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 429, description = "Too many attempts (RATE_LIMITED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_login_request(&payload)?;
    state.login_limiter.check(&payload.email)?;

    let profile = repo::profile::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &profile.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        tracing::info!("Rejected login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let auth = &state.config.auth;
    let token = jwt::sign(
        profile.id,
        &profile.email,
        &profile.role,
        &auth.jwt_secret,
        auth.session_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::hours(auth.session_ttl_hours))
        .secure(auth.cookie_secure);

    tracing::info!(profile_id = %profile.id, "Signed in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            email: profile.email,
            role: profile.role,
            expires_in: auth.session_ttl_hours * 3600,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Sign out",
    description = "Clears the session cookie. Bearer tokens stay valid until they expire.",
    responses((status = 200, description = "Signed out", body = StatusResponse)),
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(StatusResponse::ok("Signed out")),
    )
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current session",
    responses(
        (status = 200, description = "Signed-in profile", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(user), fields(profile_id = %user.profile_id))]
pub async fn me(user: SessionUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.profile_id.to_string(),
        email: user.email,
        role: user.role,
    })
}
