use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{validate_filename, MediaStore};

/// Media store backed by a single local directory
pub struct LocalMediaStore {
    base_path: PathBuf,
}

impl LocalMediaStore {
    /// Use `base_path` as the media directory, creating it if needed
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn put(&self, filename: &str, data: Bytes) -> Result<String> {
        let full_path = self.path_for(filename)?;

        // Write file
        let mut file = fs::File::create(&full_path).await.map_err(|e| {
            AppError::Storage(format!("Failed to create {:?}: {}", full_path, e))
        })?;
        file.write_all(&data).await?;
        file.flush().await?;

        tracing::debug!("Saved {} bytes to {:?}", data.len(), full_path);
        Ok(full_path.to_string_lossy().into_owned())
    }

    async fn get(&self, filename: &str) -> Result<Option<Bytes>> {
        let full_path = self.path_for(filename)?;

        match fs::read(&full_path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {:?}: {}",
                full_path, e
            ))),
        }
    }

    async fn delete(&self, filename: &str) -> Result<bool> {
        let full_path = self.path_for(filename)?;

        match fs::remove_file(&full_path).await {
            Ok(()) => {
                tracing::debug!("Deleted file {:?}", full_path);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete {:?}: {}",
                full_path, e
            ))),
        }
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf> {
        let name = validate_filename(filename)?;
        Ok(self.base_path.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store() -> (TempDir, LocalMediaStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalMediaStore::open(dir.path().join("images")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn put_then_get_returns_same_bytes() {
        let (_dir, store) = store().await;
        let data = Bytes::from_static(b"\x89PNG\r\n\x1a\nrest");

        let path = store.put("cat.png", data.clone()).await.unwrap();
        assert!(path.ends_with("cat.png"));
        assert_eq!(
            PathBuf::from(&path),
            store.base_path().join("cat.png")
        );

        let read = store.get("cat.png").await.unwrap();
        assert_eq!(read, Some(data));
    }

    #[tokio::test]
    async fn put_overwrites_existing_file() {
        let (_dir, store) = store().await;
        store.put("a.txt", Bytes::from_static(b"first")).await.unwrap();
        store.put("a.txt", Bytes::from_static(b"second")).await.unwrap();

        let read = store.get("a.txt").await.unwrap().unwrap();
        assert_eq!(&read[..], b"second");
    }

    #[tokio::test]
    async fn missing_file_is_absent_not_error() {
        let (_dir, store) = store().await;
        assert_eq!(store.get("nope.png").await.unwrap(), None);
        assert!(!store.delete("nope.png").await.unwrap());
    }

    #[tokio::test]
    async fn delete_reports_removal() {
        let (_dir, store) = store().await;
        store.put("x.gif", Bytes::from_static(b"gif")).await.unwrap();

        assert!(store.delete("x.gif").await.unwrap());
        assert!(!store.delete("x.gif").await.unwrap());
        assert_eq!(store.get("x.gif").await.unwrap(), None);
    }

    #[tokio::test]
    async fn traversal_names_never_touch_disk() {
        let (dir, store) = store().await;
        std::fs::write(dir.path().join("outside.txt"), b"keep").unwrap();

        for name in ["../outside.txt", "..", "sub/a.png", "..\\outside.txt"] {
            let err = store.get(name).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{name}");
            let err = store.delete(name).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{name}");
        }

        let err = store
            .put("../outside.txt", Bytes::from_static(b"evil"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(std::fs::read(dir.path().join("outside.txt")).unwrap(), b"keep");
    }
}
