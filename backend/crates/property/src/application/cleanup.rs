//! Best-effort image removal shared by create (rollback) and delete.

use crate::domain::repository::ImageStore;
use crate::domain::value_object::ImageRef;

/// Failures are logged and swallowed.
pub(crate) async fn discard_images<S: ImageStore>(store: &S, images: &[ImageRef]) {
    for image in images {
        match store.delete_image(image).await {
            Ok(()) => tracing::debug!(image = %image.as_str(), "Image removed"),
            Err(e) => tracing::warn!(image = %image.as_str(), error = %e, "Failed to remove image"),
        }
    }
}
