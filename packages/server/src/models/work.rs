use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::work;
use crate::error::AppError;
use crate::extractors::form::MultipartForm;
use crate::models::shared::{optional_text, required_text, validate_http_url};
use crate::utils::youtube;

/// Kind of portfolio piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Image,
    Video,
    Document,
}

impl WorkType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkType::Image => "image",
            WorkType::Video => "video",
            WorkType::Document => "document",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(WorkType::Image),
            "video" => Ok(WorkType::Video),
            "document" => Ok(WorkType::Document),
            _ => Err(AppError::Validation(
                "Type must be one of: image, video, document".into(),
            )),
        }
    }
}

/// Query parameters for listing works.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkListQuery {
    /// Only favourites (`true`) or only non-favourites (`false`).
    pub favorite: Option<bool>,
    /// Exact category match.
    pub category: Option<String>,
    /// Work type filter.
    #[serde(rename = "type")]
    #[param(rename = "type")]
    pub work_type: Option<WorkType>,
}

/// Validated text part of the work form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkInput {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub work_type: WorkType,
    pub video_url: Option<String>,
    pub is_favorite: bool,
}

impl WorkInput {
    /// Validate the text fields in order; the first failure wins.
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        let title = required_text(form.text("title"), 256, "Title", "Title is required")?;
        let category = required_text(form.text("category"), 128, "Category", "Category is required")?;
        let work_type = match form.text("type") {
            Some(raw) => raw.parse()?,
            None => WorkType::Image,
        };
        let video_url = match (work_type, form.text("video_url")) {
            (WorkType::Video, Some(url)) => Some(validate_http_url(url)?),
            (WorkType::Video, None) => {
                return Err(AppError::Validation("Must be a valid URL".into()));
            }
            _ => None,
        };
        let description = optional_text(form.text("description"), 10_000, "Description")?;

        Ok(WorkInput {
            title,
            category,
            description,
            work_type,
            video_url,
            is_favorite: form.flag("is_favorite"),
        })
    }
}

/// A work as returned by the API, with video helpers resolved.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkResponse {
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    #[schema(example = "Sunset Over Lagos")]
    pub title: String,
    #[schema(example = "Photography")]
    pub category: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "image")]
    pub work_type: String,
    pub image_url: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub document_url: Option<String>,
    pub is_favorite: bool,
    /// 11-character YouTube id when `video_url` points at YouTube.
    #[schema(example = "dQw4w9WgXcQ")]
    pub youtube_id: Option<String>,
    /// Embeddable player URL for YouTube videos.
    pub embed_url: Option<String>,
    /// Custom thumbnail, else the YouTube thumbnail for videos.
    pub display_thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<work::Model> for WorkResponse {
    fn from(model: work::Model) -> Self {
        let youtube_id = model
            .video_url
            .as_deref()
            .and_then(youtube::extract_video_id);
        let embed_url = youtube_id.as_deref().map(youtube::embed_url);
        let display_thumbnail_url = model
            .thumbnail_url
            .clone()
            .or_else(|| youtube_id.as_deref().map(youtube::thumbnail_url));

        Self {
            id: model.id.to_string(),
            title: model.title,
            category: model.category,
            description: model.description,
            work_type: model.work_type,
            image_url: model.image_url,
            image_width: model.image_width,
            image_height: model.image_height,
            video_url: model.video_url,
            thumbnail_url: model.thumbnail_url,
            document_url: model.document_url,
            is_favorite: model.is_favorite,
            youtube_id,
            embed_url,
            display_thumbnail_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Response for listing works.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkListResponse {
    pub works: Vec<WorkResponse>,
    pub total: u64,
}

/// Whether a work has enough data to be shown in a gallery tile.
pub fn is_renderable(model: &work::Model) -> bool {
    match model.work_type.as_str() {
        "image" => {
            model.image_url.is_some() && model.image_width.is_some() && model.image_height.is_some()
        }
        "video" => model.video_url.is_some(),
        _ => false,
    }
}
