use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::{ContentHash, ObjectKey, StorageError};
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Content types rendered in place. Anything else is a download.
const INLINE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Serve a stored object. Used with the filesystem backend, whose public
/// URLs point back at this route.
#[instrument(skip(state, headers))]
pub async fn serve_object(
    State(state): State<AppState>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key = ObjectKey::new(bucket, path)
        .map_err(|_| AppError::NotFound("Object not found".into()))?;
    let bytes = state.store.get(&key).await.map_err(read_error)?;

    let etag_value = format!("\"{}\"", ContentHash::compute(&bytes).to_hex());
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let content_type = mime_guess::from_path(key.file_name())
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let inline = INLINE_TYPES.contains(&content_type.as_str());

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &content_type)
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(key.file_name(), inline),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
    if !inline {
        builder = builder.header(header::CONTENT_SECURITY_POLICY, "sandbox");
    }

    builder
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Map a storage read failure onto the public route. Reads never report
/// upload errors.
fn read_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(_) | StorageError::InvalidKey(_) => {
            AppError::NotFound("Object not found".into())
        }
        StorageError::Io(e) => {
            warn!(error = %e, "Object read failed");
            AppError::NotFound("Object not found".into())
        }
        other => AppError::Internal(format!("Object read failed: {other}")),
    }
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str, inline: bool) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    let kind = if inline { "inline" } else { "attachment" };
    format!("{kind}; filename=\"{ascii_name}\"")
}
