use std::fmt;

use super::error::StorageError;

/// Location of an object: a bucket plus a `/`-separated path inside it.
///
/// Both parts are validated on construction so that every backend can map a
/// key onto its own namespace (a directory tree, an S3 bucket) without
/// re-checking for traversal or header-unsafe characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    bucket: String,
    path: String,
}

impl ObjectKey {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Result<Self, StorageError> {
        let bucket = bucket.into();
        let path = path.into();
        validate_bucket(&bucket)?;
        validate_path(&path)?;
        Ok(Self { bucket, path })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.path)
    }
}

fn validate_bucket(bucket: &str) -> Result<(), StorageError> {
    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(StorageError::InvalidKey(
            "bucket name must be 3-63 characters".into(),
        ));
    }
    if !bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(StorageError::InvalidKey(
            "bucket name may only contain lowercase letters, digits and '-'".into(),
        ));
    }
    if bucket.starts_with('-') || bucket.ends_with('-') {
        return Err(StorageError::InvalidKey(
            "bucket name must not start or end with '-'".into(),
        ));
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidKey("path cannot be empty".into()));
    }
    if path.len() > 512 {
        return Err(StorageError::InvalidKey(
            "path exceeds maximum length of 512 characters".into(),
        ));
    }
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(StorageError::InvalidKey(
                "path must not contain empty segments".into(),
            ));
        }
        if segment.starts_with('.') {
            return Err(StorageError::InvalidKey(
                "path segments must not start with '.'".into(),
            ));
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(StorageError::InvalidKey(format!(
                "invalid character in path segment '{segment}'"
            )));
        }
    }
    Ok(())
}
