use serde::Serialize;

use crate::error::AppError;

/// Bucket for portfolio images, thumbnails and documents.
pub const WORKS_BUCKET: &str = "works-images";
/// Bucket for content setting images.
pub const CONTENT_BUCKET: &str = "content-images";

pub const WORKS_FOLDER: &str = "works";
pub const DOCUMENTS_FOLDER: &str = "documents";
pub const CONTENT_FOLDER: &str = "content_settings";

/// Only the site's own buckets accept uploads.
pub fn validate_bucket(bucket: &str) -> Result<&'static str, AppError> {
    match bucket {
        WORKS_BUCKET => Ok(WORKS_BUCKET),
        CONTENT_BUCKET => Ok(CONTENT_BUCKET),
        _ => Err(AppError::Validation(format!(
            "Bucket must be one of: {WORKS_BUCKET}, {CONTENT_BUCKET}"
        ))),
    }
}

/// Folder defaults to the bucket's main folder; otherwise one `[a-z0-9_-]` segment.
pub fn validate_folder(bucket: &str, folder: Option<&str>) -> Result<String, AppError> {
    let Some(folder) = folder else {
        return Ok(if bucket == CONTENT_BUCKET {
            CONTENT_FOLDER.to_string()
        } else {
            WORKS_FOLDER.to_string()
        });
    };
    if folder.len() > 64
        || !folder
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
    {
        return Err(AppError::Validation(
            "Folder must be up to 64 characters of lowercase letters, digits, '-' and '_'".into(),
        ));
    }
    Ok(folder.to_string())
}

/// A stored upload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Public URL of the object.
    #[schema(example = "http://127.0.0.1:3000/storage/works-images/works/sunset-1718000000000-a1b2c3.jpg")]
    pub url: String,
    #[schema(example = "works/sunset-1718000000000-a1b2c3.jpg")]
    pub path: String,
    /// Pixel width, for images.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Size in bytes.
    pub size: u64,
    #[schema(example = "image/jpeg")]
    pub content_type: String,
}
