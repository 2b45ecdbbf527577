use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::key::ObjectKey;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Bucketed object storage with publicly addressable objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under `key`, replacing any existing object.
    async fn put(&self, key: &ObjectKey, data: &[u8], content_type: &str)
    -> Result<(), StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(key).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Get the size of an object in bytes.
    async fn size(&self, key: &ObjectKey) -> Result<u64, StorageError>;

    /// URL prefix under which `{bucket}/{path}` is publicly reachable.
    fn public_base(&self) -> &str;

    fn public_url(&self, key: &ObjectKey) -> String {
        format!(
            "{}/{}/{}",
            self.public_base().trim_end_matches('/'),
            key.bucket(),
            key.path()
        )
    }

    /// Map a public URL produced by this store back to its key.
    ///
    /// Returns `None` for URLs this store did not issue (external links,
    /// objects from a previous storage backend).
    fn locate(&self, url: &str) -> Option<ObjectKey> {
        let rest = url.strip_prefix(self.public_base().trim_end_matches('/'))?;
        let rest = rest.strip_prefix('/')?;
        let (bucket, path) = rest.split_once('/')?;
        ObjectKey::new(bucket, path).ok()
    }
}
