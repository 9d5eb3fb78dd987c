//! Disk-backed image store
//!
//! Files land in one flat directory as `<unix-ms>-<16 hex>-<sanitised name>`.
//! The random part keeps two uploads in the same millisecond apart.

use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::repository::ImageStore;
use crate::domain::value_object::ImageRef;
use crate::error::{PropertyError, PropertyResult};

const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone)]
pub struct DiskImageStore {
    root: PathBuf,
    url_prefix: String,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path on disk for a reference; `None` when the name could escape the root
    fn path_for(&self, image: &ImageRef) -> Option<PathBuf> {
        let name = image.file_name();
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && image.as_str().starts_with(self.url_prefix.trim_end_matches('/'));
        plain.then(|| self.root.join(name))
    }
}

/// Keeps ASCII letters, digits, `.`, `-`, `_` of the last path segment.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned: String = cleaned.chars().take(MAX_NAME_LENGTH).collect();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

/// Write and flush `bytes`; on failure the partial file at `path` is removed.
async fn write_or_discard<W>(mut file: W, path: &Path, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(bytes).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    let Err(e) = written else {
        return Ok(());
    };
    drop(file);
    if let Err(cleanup) = tokio::fs::remove_file(path).await {
        tracing::warn!(
            file = %path.display(),
            error = %cleanup,
            "Failed to remove partially written image"
        );
    }
    Err(e)
}

impl ImageStore for DiskImageStore {
    async fn store_image(&self, bytes: &[u8], original_name: &str) -> PropertyResult<ImageRef> {
        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            platform::crypto::random_hex(8),
            sanitize_file_name(original_name)
        );
        let path = self.root.join(&file_name);

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        write_or_discard(file, &path, bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "Image stored");
        Ok(ImageRef::new(&self.url_prefix, &file_name))
    }

    async fn delete_image(&self, image: &ImageRef) -> PropertyResult<()> {
        let path = self.path_for(image).ok_or_else(|| {
            PropertyError::Internal(format!(
                "refusing to delete image outside uploads: {}",
                image.as_str()
            ))
        })?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(image = %image.as_str(), "Image already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("front door.JPG"), "front_door.JPG");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\a.png"), "a.png");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "image");
        assert_eq!(sanitize_file_name("..."), "image");
        assert_eq!(sanitize_file_name(&"a".repeat(300)).len(), MAX_NAME_LENGTH);
    }

    /// Accepts every write, then fails the flush
    struct FlushFails;

    impl AsyncWrite for FlushFails {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Err(std::io::Error::other("disk full")))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_flush_removes_partial_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("1-abc-front.jpg");
        std::fs::write(&path, b"half").unwrap();

        let err = write_or_discard(FlushFails, &path, b"jpeg bytes")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!path.exists());

        // Nothing left to remove: the original error still comes back.
        let err = write_or_discard(FlushFails, &path, b"jpeg bytes")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }

    #[tokio::test]
    async fn test_store_and_delete() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = DiskImageStore::new(dir.path().join("uploads"), "/uploads");

        let image = store.store_image(b"jpeg bytes", "front.jpg").await.unwrap();
        assert!(image.as_str().starts_with("/uploads/"));
        assert!(image.file_name().ends_with("-front.jpg"));

        let path = store.root().join(image.file_name());
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"jpeg bytes");

        store.delete_image(&image).await.unwrap();
        assert!(!path.exists());
        // Missing file is not an error.
        store.delete_image(&image).await.unwrap();
    }

    #[tokio::test]
    async fn test_same_name_uploads_do_not_collide() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = DiskImageStore::new(dir.path(), "/uploads");

        let a = store.store_image(b"a", "room.png").await.unwrap();
        let b = store.store_image(b"b", "room.png").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_delete_refuses_foreign_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = DiskImageStore::new(dir.path(), "/uploads");

        assert!(store.delete_image(&ImageRef::from_db("/uploads/..")).await.is_err());
        assert!(store.delete_image(&ImageRef::from_db("/etc/passwd")).await.is_err());
    }
}
