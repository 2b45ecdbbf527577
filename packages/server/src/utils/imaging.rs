use std::io::Cursor;

use image::ImageReader;

use crate::error::AppError;

/// Pixel dimensions of an encoded image (PNG, JPEG, WebP or GIF).
pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32), AppError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AppError::Validation(format!("Unreadable image: {e}")))?
        .into_dimensions()
        .map_err(|_| AppError::Validation("Uploaded file is not a supported image".into()))
}

/// Whether `content_type` names an image type.
pub fn is_image_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}
