use std::io::Cursor;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::{BoxReader, ObjectStore};

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Address buckets as `{endpoint}/{bucket}` instead of `{bucket}.{endpoint}`.
    pub path_style: bool,
}

/// Object store backed by an S3-compatible service.
///
/// Each logical bucket maps onto the remote bucket of the same name.
pub struct S3ObjectStore {
    region: Region,
    credentials: Credentials,
    path_style: bool,
    public_base: String,
    max_size: u64,
}

impl S3ObjectStore {
    pub fn new(
        settings: S3Settings,
        public_base: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            Some(&settings.access_key),
            Some(&settings.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid S3 credentials: {e}")))?;

        Ok(Self {
            region: Region::Custom {
                region: settings.region,
                endpoint: settings.endpoint,
            },
            credentials,
            path_style: settings.path_style,
            public_base: public_base.into(),
            max_size,
        })
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>, StorageError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

fn check_status(status: u16, key: &ObjectKey) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        other => Err(StorageError::Backend(format!(
            "unexpected status {other} for {key}"
        ))),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket(key.bucket())?
            .put_object_with_content_type(key.path(), data, content_type)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        check_status(response.status_code(), key)
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError> {
        let response = self
            .bucket(key.bucket())?
            .get_object(key.path())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        check_status(response.status_code(), key)?;
        Ok(Box::new(Cursor::new(response.bytes().to_vec())))
    }

    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        match self.size(key).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        if !self.exists(key).await? {
            return Ok(false);
        }
        let response = self
            .bucket(key.bucket())?
            .delete_object(key.path())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        check_status(response.status_code(), key)?;
        Ok(true)
    }

    async fn size(&self, key: &ObjectKey) -> Result<u64, StorageError> {
        let (head, status) = self
            .bucket(key.bucket())?
            .head_object(key.path())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        check_status(status, key)?;
        Ok(head.content_length.unwrap_or(0).max(0) as u64)
    }

    fn public_base(&self) -> &str {
        &self.public_base
    }
}
