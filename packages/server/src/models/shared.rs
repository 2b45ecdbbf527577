use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// Envelope for mutation responses: `{success, message, data?}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ActionResponse<T> {
    /// Always `true`; failures use `ErrorBody`.
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Work added successfully")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Envelope for mutations that return no payload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatusResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Work deleted successfully")]
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Parse a path id, reporting malformed ids as a validation error.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation(format!("Invalid {what} ID")))
}

/// Trimmed required text. `missing` is returned verbatim when absent or blank.
pub fn required_text(
    value: Option<&str>,
    max_chars: usize,
    field: &str,
    missing: &str,
) -> Result<String, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::Validation(missing.into()));
    }
    check_length(value, max_chars, field)?;
    Ok(value.to_string())
}

/// Trimmed optional text; blank becomes `None`.
pub fn optional_text(
    value: Option<&str>,
    max_chars: usize,
    field: &str,
) -> Result<Option<String>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => {
            check_length(v, max_chars, field)?;
            Ok(Some(v.to_string()))
        }
        None => Ok(None),
    }
}

fn check_length(value: &str, max_chars: usize, field: &str) -> Result<(), AppError> {
    if value.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

/// Accept only absolute `http`/`https` URLs with a host.
pub fn validate_http_url(value: &str) -> Result<String, AppError> {
    let invalid = || AppError::Validation("Must be a valid URL".into());
    let parsed = url::Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(parsed.to_string())
}
