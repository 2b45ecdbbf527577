use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::Set;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::work;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::form::{MultipartForm, UploadedFile};
use crate::handlers::uploads::{self, Expect, StoredObject};
use crate::models::shared::{ActionResponse, StatusResponse, parse_id};
use crate::models::upload::{DOCUMENTS_FOLDER, WORKS_BUCKET, WORKS_FOLDER};
use crate::models::work::{WorkInput, WorkListQuery, WorkListResponse, WorkResponse, WorkType};
use crate::repo;
use crate::state::AppState;

/// Files sent with a work form. Only those relevant to the work type are kept.
struct WorkFiles {
    image: Option<UploadedFile>,
    document: Option<UploadedFile>,
    thumbnail: Option<UploadedFile>,
}

impl WorkFiles {
    fn take(form: &mut MultipartForm, work_type: WorkType) -> Self {
        let image = form.take_file("image");
        let document = form.take_file("document");
        let thumbnail = form.take_file("thumbnail");
        Self {
            image: image.filter(|_| work_type == WorkType::Image),
            document: document.filter(|_| work_type == WorkType::Document),
            thumbnail,
        }
    }

    /// Reject bad files before anything is written.
    fn check(&self, max_size: u64) -> Result<(), AppError> {
        if let Some(f) = &self.image {
            uploads::inspect(f, Expect::Image, max_size)?;
        }
        if let Some(f) = &self.thumbnail {
            uploads::inspect(f, Expect::Image, max_size)?;
        }
        if let Some(f) = &self.document {
            uploads::inspect(f, Expect::Any, max_size)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct StoredWorkFiles {
    image: Option<StoredObject>,
    document: Option<StoredObject>,
    thumbnail: Option<StoredObject>,
}

impl StoredWorkFiles {
    fn all(&self) -> Vec<StoredObject> {
        [&self.image, &self.document, &self.thumbnail]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

/// Upload every file; if one fails, the ones already written are removed.
async fn store_work_files(
    state: &AppState,
    title: &str,
    files: &WorkFiles,
) -> Result<StoredWorkFiles, AppError> {
    let store = &*state.store;
    let max = state.config.storage.max_upload_size;
    let mut stored = StoredWorkFiles::default();

    let result: Result<(), AppError> = async {
        if let Some(f) = &files.image {
            stored.image = Some(
                uploads::store_file(store, WORKS_BUCKET, WORKS_FOLDER, title, f, Expect::Image, max)
                    .await?,
            );
        }
        if let Some(f) = &files.thumbnail {
            let hint = format!("{title}-thumb");
            stored.thumbnail = Some(
                uploads::store_file(store, WORKS_BUCKET, WORKS_FOLDER, &hint, f, Expect::Image, max)
                    .await?,
            );
        }
        if let Some(f) = &files.document {
            stored.document = Some(
                uploads::store_file(store, WORKS_BUCKET, DOCUMENTS_FOLDER, title, f, Expect::Any, max)
                    .await?,
            );
        }
        Ok(())
    }
    .await;

    if let Err(e) = result {
        uploads::discard(store, &stored.all()).await;
        return Err(e);
    }
    Ok(stored)
}

/// Store the files, then insert the row. A failed upload stops before the
/// database is touched; a failed insert removes the objects just written.
async fn add_work(
    state: &AppState,
    input: WorkInput,
    files: &WorkFiles,
) -> Result<work::Model, AppError> {
    let stored = store_work_files(state, &input.title, files).await?;

    let now = Utc::now();
    let model = work::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(input.title),
        category: Set(input.category),
        description: Set(input.description),
        work_type: Set(input.work_type.as_str().to_string()),
        image_url: Set(stored.image.as_ref().map(|o| o.url.clone())),
        image_width: Set(stored.image.as_ref().and_then(StoredObject::width_i32)),
        image_height: Set(stored.image.as_ref().and_then(StoredObject::height_i32)),
        video_url: Set(input.video_url),
        thumbnail_url: Set(stored.thumbnail.as_ref().map(|o| o.url.clone())),
        document_url: Set(stored.document.as_ref().map(|o| o.url.clone())),
        is_favorite: Set(input.is_favorite),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match repo::work::insert(&state.db, model).await {
        Ok(saved) => Ok(saved),
        Err(e) => {
            uploads::discard(&*state.store, &stored.all()).await;
            Err(e)
        }
    }
}

/// Store new files, write the row, then delete the objects it no longer
/// references. On a failed write the new objects go and the old ones stay.
async fn apply_update(
    state: &AppState,
    existing: work::Model,
    input: WorkInput,
    remove_thumbnail: bool,
    files: &WorkFiles,
) -> Result<work::Model, AppError> {
    let stored = store_work_files(state, &input.title, files).await?;

    // Objects the row stops pointing at; deleted only once the write succeeds.
    let mut orphaned: Vec<String> = Vec::new();

    let (image_url, image_width, image_height) = match (&stored.image, input.work_type) {
        (Some(obj), _) => {
            orphaned.extend(existing.image_url.clone());
            (Some(obj.url.clone()), obj.width_i32(), obj.height_i32())
        }
        (None, WorkType::Image) => (
            existing.image_url.clone(),
            existing.image_width,
            existing.image_height,
        ),
        (None, _) => {
            orphaned.extend(existing.image_url.clone());
            (None, None, None)
        }
    };

    let document_url = match (&stored.document, input.work_type) {
        (Some(obj), _) => {
            orphaned.extend(existing.document_url.clone());
            Some(obj.url.clone())
        }
        (None, WorkType::Document) => existing.document_url.clone(),
        (None, _) => {
            orphaned.extend(existing.document_url.clone());
            None
        }
    };

    let thumbnail_url = match &stored.thumbnail {
        Some(obj) => {
            orphaned.extend(existing.thumbnail_url.clone());
            Some(obj.url.clone())
        }
        None if remove_thumbnail => {
            orphaned.extend(existing.thumbnail_url.clone());
            None
        }
        None => existing.thumbnail_url.clone(),
    };

    let mut active: work::ActiveModel = existing.into();
    active.title = Set(input.title);
    active.category = Set(input.category);
    active.description = Set(input.description);
    active.work_type = Set(input.work_type.as_str().to_string());
    active.image_url = Set(image_url);
    active.image_width = Set(image_width);
    active.image_height = Set(image_height);
    active.video_url = Set(input.video_url);
    active.thumbnail_url = Set(thumbnail_url);
    active.document_url = Set(document_url);
    active.is_favorite = Set(input.is_favorite);
    active.updated_at = Set(Utc::now());

    let saved = match repo::work::update(&state.db, active).await {
        Ok(saved) => saved,
        Err(e) => {
            uploads::discard(&*state.store, &stored.all()).await;
            return Err(e);
        }
    };

    uploads::delete_by_urls(&*state.store, orphaned.iter().map(String::as_str)).await;
    Ok(saved)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Works",
    operation_id = "listWorks",
    summary = "List works",
    description = "Returns works newest first, optionally filtered by favourite flag, category \
        or type.",
    params(WorkListQuery),
    responses(
        (status = 200, description = "Works", body = WorkListResponse),
        (status = 400, description = "Invalid filter value"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_works(
    State(state): State<AppState>,
    Query(query): Query<WorkListQuery>,
) -> Result<Json<WorkListResponse>, AppError> {
    let works = repo::work::list(&state.db, &query).await?;
    let total = works.len() as u64;
    Ok(Json(WorkListResponse {
        works: works.into_iter().map(WorkResponse::from).collect(),
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Works",
    operation_id = "getWork",
    summary = "Get a work",
    params(("id" = String, Path, description = "Work ID (UUID)")),
    responses(
        (status = 200, description = "Work", body = WorkResponse),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Work not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_work(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkResponse>, AppError> {
    let id = parse_id(&id, "work")?;
    Ok(Json(repo::work::find(&state.db, id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Works",
    operation_id = "createWork",
    summary = "Add a work",
    description = "Multipart form. Text fields: `title`, `category`, `description`, `type` \
        (`image` default, `video`, `document`), `video_url`, `is_favorite`. File fields: \
        `image` (required for image works), `document` (required for document works), \
        `thumbnail`. Files are stored before the row is written; if the write fails they are \
        removed again.",
    request_body(content_type = "multipart/form-data", description = "Work form"),
    responses(
        (status = 201, description = "Work added", body = ActionResponse<WorkResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 502, description = "Storage failure (UPLOAD_ERROR)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, form))]
pub async fn create_work(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let input = WorkInput::from_form(&form)?;
    let files = WorkFiles::take(&mut form, input.work_type);

    match input.work_type {
        WorkType::Image if files.image.is_none() => {
            return Err(AppError::Validation(
                "An image file is required for image works".into(),
            ));
        }
        WorkType::Document if files.document.is_none() => {
            return Err(AppError::Validation(
                "A document file is required for document works".into(),
            ));
        }
        _ => {}
    }
    files.check(state.config.storage.max_upload_size)?;

    let saved = add_work(&state, input, &files).await?;

    tracing::info!(work_id = %saved.id, "Work added");
    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::with_data(
            "Work added successfully",
            WorkResponse::from(saved),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Works",
    operation_id = "updateWork",
    summary = "Update a work",
    description = "Same form as create. Omitted files keep the stored objects; \
        `remove_thumbnail=true` clears the thumbnail. Replaced objects are deleted after the \
        row is written.",
    params(("id" = String, Path, description = "Work ID (UUID)")),
    request_body(content_type = "multipart/form-data", description = "Work form"),
    responses(
        (status = 200, description = "Work updated", body = ActionResponse<WorkResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Work not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Storage failure (UPLOAD_ERROR)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, form))]
pub async fn update_work(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "work")?;
    let existing = repo::work::find(&state.db, id).await?;

    let input = WorkInput::from_form(&form)?;
    let remove_thumbnail = form.flag("remove_thumbnail");
    let files = WorkFiles::take(&mut form, input.work_type);

    match input.work_type {
        WorkType::Image if files.image.is_none() && existing.image_url.is_none() => {
            return Err(AppError::Validation(
                "An image file is required for image works".into(),
            ));
        }
        WorkType::Document if files.document.is_none() && existing.document_url.is_none() => {
            return Err(AppError::Validation(
                "A document file is required for document works".into(),
            ));
        }
        _ => {}
    }
    files.check(state.config.storage.max_upload_size)?;

    let saved = apply_update(&state, existing, input, remove_thumbnail, &files).await?;

    tracing::info!(work_id = %saved.id, "Work updated");
    Ok(Json(ActionResponse::with_data(
        "Work updated successfully",
        WorkResponse::from(saved),
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Works",
    operation_id = "deleteWork",
    summary = "Delete a work",
    description = "Deletes the row, then every stored object it owned (image, thumbnail, \
        document). Storage failures are logged and do not fail the request.",
    params(("id" = String, Path, description = "Work ID (UUID)")),
    responses(
        (status = 200, description = "Work deleted", body = StatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Work not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_work(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "work")?;
    let existing = repo::work::find(&state.db, id).await?;

    if !repo::work::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Work not found".into()));
    }

    let urls = [
        existing.image_url.as_deref(),
        existing.thumbnail_url.as_deref(),
        existing.document_url.as_deref(),
    ];
    uploads::delete_by_urls(&*state.store, urls.into_iter().flatten()).await;

    tracing::info!(work_id = %id, "Work deleted");
    Ok(Json(StatusResponse::ok("Work deleted successfully")))
}
