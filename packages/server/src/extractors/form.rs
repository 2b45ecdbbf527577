use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request, multipart::Field};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::filename::validate_flat_filename;

/// Upper bound for a single text field.
const MAX_TEXT_FIELD: usize = 64 * 1024;

/// A file part of a multipart form, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A parsed `multipart/form-data` body: text fields and file fields by name.
///
/// File parts are capped at `storage.max_upload_size`. A file input left
/// empty by the browser (no filename, no bytes) is treated as absent.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Trimmed text value; empty strings count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Checkbox-style flag: `true`, `on`, `1` and `yes` are true.
    pub fn flag(&self, name: &str) -> bool {
        self.text(name)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes"))
    }

    /// Whether the field was sent at all, even empty.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    pub async fn read(multipart: &mut Multipart, max_file_size: u64) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .map(str::to_string)
                        .or_else(|| mime_guess::from_path(&file_name).first().map(|m| m.to_string()))
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    let bytes = read_limited(field, max_file_size, true).await?;

                    if file_name.trim().is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let file_name = validate_flat_filename(&file_name)
                        .map_err(|e| AppError::Validation(e.message().into()))?
                        .to_string();
                    if bytes.is_empty() {
                        return Err(AppError::Validation(format!("File '{file_name}' is empty")));
                    }

                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let bytes = read_limited(field, MAX_TEXT_FIELD as u64, false).await?;
                    let text = String::from_utf8(bytes).map_err(|_| {
                        AppError::Validation("Form fields must be valid UTF-8".into())
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }
}

async fn read_limited(mut field: Field<'_>, max: u64, is_file: bool) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        if (buf.len() + chunk.len()) as u64 > max {
            return Err(AppError::Validation(if is_file {
                format!("File exceeds maximum size of {max} bytes")
            } else {
                format!("Form field exceeds maximum size of {max} bytes")
            }));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

impl FromRequest<AppState> for MultipartForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Self::read(&mut multipart, state.config.storage.max_upload_size).await
    }
}

#[cfg(test)]
impl MultipartForm {
    pub(crate) fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }
}
