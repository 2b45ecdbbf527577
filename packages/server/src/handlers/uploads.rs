use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::storage::{ObjectKey, ObjectStore};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::form::{MultipartForm, UploadedFile};
use crate::models::shared::ActionResponse;
use crate::models::upload::{UploadResponse, WORKS_BUCKET, validate_bucket, validate_folder};
use crate::state::AppState;
use crate::utils::filename::{object_path, pick_extension};
use crate::utils::imaging;

/// What a file must be to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Image,
    Any,
}

/// An object written during the current request.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: ObjectKey,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size: u64,
    pub content_type: String,
}

impl StoredObject {
    pub fn width_i32(&self) -> Option<i32> {
        self.width.and_then(|w| i32::try_from(w).ok())
    }

    pub fn height_i32(&self) -> Option<i32> {
        self.height.and_then(|h| i32::try_from(h).ok())
    }
}

impl From<StoredObject> for UploadResponse {
    fn from(obj: StoredObject) -> Self {
        Self {
            url: obj.url,
            path: obj.key.path().to_string(),
            width: obj.width,
            height: obj.height,
            size: obj.size,
            content_type: obj.content_type,
        }
    }
}

/// Check a file without storing it: size, and decodability for images.
///
/// Returns the pixel dimensions for images.
pub fn inspect(
    file: &UploadedFile,
    expect: Expect,
    max_size: u64,
) -> Result<Option<(u32, u32)>, AppError> {
    let size = file.bytes.len() as u64;
    if size > max_size {
        return Err(AppError::Validation(format!(
            "File exceeds maximum size of {max_size} bytes"
        )));
    }
    if expect == Expect::Image || imaging::is_image_type(&file.content_type) {
        return imaging::dimensions(&file.bytes).map(Some);
    }
    Ok(None)
}

/// Validate and write one file under `{bucket}/{folder}/`.
///
/// `name_hint` becomes the readable part of the object name.
pub async fn store_file(
    store: &dyn ObjectStore,
    bucket: &str,
    folder: &str,
    name_hint: &str,
    file: &UploadedFile,
    expect: Expect,
    max_size: u64,
) -> Result<StoredObject, AppError> {
    let dims = inspect(file, expect, max_size)?;
    let ext = pick_extension(&file.file_name, &file.content_type);
    let path = object_path(folder, name_hint, &ext, Utc::now().timestamp_millis());
    let key = ObjectKey::new(bucket, path)?;

    store.put(&key, &file.bytes, &file.content_type).await?;
    tracing::info!(object = %key, size = file.bytes.len(), "Stored upload");

    Ok(StoredObject {
        url: store.public_url(&key),
        width: dims.map(|(w, _)| w),
        height: dims.map(|(_, h)| h),
        size: file.bytes.len() as u64,
        content_type: file.content_type.clone(),
        key,
    })
}

/// Best-effort removal of objects written earlier in a failed request.
pub async fn discard(store: &dyn ObjectStore, objects: &[StoredObject]) {
    for obj in objects {
        if let Err(e) = store.delete(&obj.key).await {
            tracing::warn!(object = %obj.key, "Failed to clean up upload: {}", e);
        }
    }
}

/// Best-effort removal of objects referenced by stored public URLs.
///
/// URLs the store did not issue are skipped.
pub async fn delete_by_urls<'a>(
    store: &dyn ObjectStore,
    urls: impl IntoIterator<Item = &'a str>,
) {
    for url in urls {
        let Some(key) = store.locate(url) else {
            tracing::debug!(url, "Skipping delete of foreign URL");
            continue;
        };
        match store.delete(&key).await {
            Ok(true) => tracing::info!(object = %key, "Deleted stored object"),
            Ok(false) => tracing::debug!(object = %key, "Stored object already gone"),
            Err(e) => tracing::warn!(object = %key, "Failed to delete stored object: {}", e),
        }
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Uploads",
    operation_id = "uploadFile",
    summary = "Upload a file",
    description = "Stores one file in `works-images` or `content-images`. The `file` field is \
        required; `bucket` defaults to `works-images` and `folder` to the bucket's main folder. \
        Image dimensions are read from the file.",
    request_body(content_type = "multipart/form-data", description = "file, bucket, folder"),
    responses(
        (status = 201, description = "Stored", body = ActionResponse<UploadResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 502, description = "Storage failure (UPLOAD_ERROR)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, form))]
pub async fn upload_file(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let bucket = validate_bucket(form.text("bucket").unwrap_or(WORKS_BUCKET))?;
    let folder = validate_folder(bucket, form.text("folder"))?;
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let hint = file
        .file_name
        .rsplit_once('.')
        .map_or(file.file_name.as_str(), |(stem, _)| stem)
        .to_string();

    let stored = store_file(
        &*state.store,
        bucket,
        &folder,
        &hint,
        &file,
        Expect::Any,
        state.config.storage.max_upload_size,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::with_data(
            "File uploaded successfully",
            UploadResponse::from(stored),
        )),
    ))
}
