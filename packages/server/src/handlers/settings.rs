use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::entity::content_setting;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::form::{MultipartForm, UploadedFile};
use crate::handlers::uploads::{self, Expect};
use crate::models::content_setting::{
    ContentSettingResponse, ContentSettingsResponse, validate_key,
};
use crate::models::shared::{ActionResponse, StatusResponse};
use crate::models::upload::{CONTENT_BUCKET, CONTENT_FOLDER};
use crate::repo;
use crate::repo::content_setting::SettingValue;
use crate::state::AppState;

/// Store the new image, upsert the row, then delete the image it replaced.
/// A failed upsert removes the new image and keeps the old one.
async fn save_setting(
    state: &AppState,
    key: &str,
    existing: Option<&content_setting::Model>,
    text: Option<String>,
    remove_image: bool,
    image: Option<&UploadedFile>,
) -> Result<content_setting::Model, AppError> {
    let stored = match image {
        Some(file) => Some(
            uploads::store_file(
                &*state.store,
                CONTENT_BUCKET,
                CONTENT_FOLDER,
                key,
                file,
                Expect::Image,
                state.config.storage.max_upload_size,
            )
            .await?,
        ),
        None => None,
    };

    let previous_image = existing.and_then(|row| row.value_image_url.clone());
    let (value, orphaned) = match &stored {
        Some(obj) => (
            SettingValue {
                text,
                image_url: Some(obj.url.clone()),
                image_width: obj.width_i32(),
                image_height: obj.height_i32(),
            },
            previous_image,
        ),
        None if remove_image => (
            SettingValue {
                text,
                ..Default::default()
            },
            previous_image,
        ),
        None => (
            SettingValue {
                text,
                image_url: previous_image,
                image_width: existing.and_then(|row| row.value_image_width),
                image_height: existing.and_then(|row| row.value_image_height),
            },
            None,
        ),
    };

    let saved = match repo::content_setting::upsert(&state.db, key, value).await {
        Ok(saved) => saved,
        Err(e) => {
            if let Some(obj) = stored {
                uploads::discard(&*state.store, &[obj]).await;
            }
            return Err(e);
        }
    };

    uploads::delete_by_urls(&*state.store, orphaned.as_deref()).await;
    Ok(saved)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Content Settings",
    operation_id = "listContentSettings",
    summary = "All stored content overrides",
    description = "Keys without an override are absent; the page endpoints fill them from the \
        built-in defaults.",
    responses((status = 200, description = "Overrides by key", body = ContentSettingsResponse)),
)]
#[instrument(skip(state))]
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<ContentSettingsResponse>, AppError> {
    let settings = repo::content_setting::list(&state.db)
        .await?
        .into_iter()
        .map(|row| (row.key.clone(), ContentSettingResponse::from(row)))
        .collect();
    Ok(Json(ContentSettingsResponse { settings }))
}

#[utoipa::path(
    put,
    path = "/{key}",
    tag = "Content Settings",
    operation_id = "upsertContentSetting",
    summary = "Create or overwrite a content override",
    description = "Multipart form. `value_text` sets the text (empty clears it; omitted keeps \
        it). An `image` file replaces the image; `remove_image=true` without a file clears it. \
        The previous image is deleted after the row is written.",
    params(("key" = String, Path, description = "Content key, e.g. `about_me_portrait_image`")),
    request_body(content_type = "multipart/form-data", description = "value_text, image, remove_image"),
    responses(
        (status = 200, description = "Saved", body = ActionResponse<ContentSettingResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 502, description = "Storage failure (UPLOAD_ERROR)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, form))]
pub async fn upsert_setting(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    mut form: MultipartForm,
) -> Result<Json<ActionResponse<ContentSettingResponse>>, AppError> {
    validate_key(&key)?;
    let existing = repo::content_setting::find_by_key(&state.db, &key).await?;

    let text = if form.has_field("value_text") {
        form.text("value_text").map(str::to_string)
    } else {
        existing.as_ref().and_then(|row| row.value_text.clone())
    };
    let remove_image = form.flag("remove_image");
    let image = form.take_file("image");

    let saved = save_setting(&state, &key, existing.as_ref(), text, remove_image, image.as_ref())
        .await?;

    tracing::info!(key = %key, "Content setting saved");
    Ok(Json(ActionResponse::with_data(
        "Content setting saved successfully",
        ContentSettingResponse::from(saved),
    )))
}

#[utoipa::path(
    delete,
    path = "/{key}",
    tag = "Content Settings",
    operation_id = "deleteContentSetting",
    summary = "Remove a content override",
    description = "Deletes the override and its image; pages fall back to the default.",
    params(("key" = String, Path, description = "Content key")),
    responses(
        (status = 200, description = "Override removed", body = StatusResponse),
        (status = 400, description = "Invalid key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "No override for key (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_setting(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    validate_key(&key)?;
    let existing = repo::content_setting::find_by_key(&state.db, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No override for '{key}'")))?;

    repo::content_setting::delete(&state.db, &key).await?;
    uploads::delete_by_urls(&*state.store, existing.value_image_url.as_deref()).await;

    Ok(Json(StatusResponse::ok("Content setting reset to default")))
}
