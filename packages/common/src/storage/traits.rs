use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Named-file storage for avatar images.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `data` under `file_name` and return the path of the stored file.
    ///
    /// An existing file with the same name is replaced.
    async fn write(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError>;

    /// Read all bytes of the file at `path`.
    async fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.read_stream(path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Open the file at `path` as a streaming async reader.
    async fn read_stream(&self, path: &Path) -> Result<BoxReader, StorageError>;

    /// Delete the file at `path`.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &Path) -> Result<bool, StorageError>;
}
