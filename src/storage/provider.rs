use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

use crate::error::Result;

/// Blob storage for uploaded images, addressed by filename
///
/// Absence is reported as `None` / `false`; `Err` is reserved for real I/O
/// failures and invalid filenames.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `data` under `filename`, replacing any existing file.
    /// Returns the path string recorded on posts.
    async fn put(&self, filename: &str, data: Bytes) -> Result<String>;

    /// Read a file back
    async fn get(&self, filename: &str) -> Result<Option<Bytes>>;

    /// Remove a file, returning whether it existed
    async fn delete(&self, filename: &str) -> Result<bool>;

    /// Resolve a filename to its location inside the store
    fn path_for(&self, filename: &str) -> Result<PathBuf>;
}
