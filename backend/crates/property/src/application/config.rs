//! Application Configuration

use std::path::PathBuf;

/// Public prefix under which stored images are served
pub const DEFAULT_URL_PREFIX: &str = "/uploads";

/// Property application configuration
#[derive(Debug, Clone)]
pub struct PropertyConfig {
    /// Images accepted per listing (5)
    pub max_images: usize,
    /// Per-image size limit in bytes (10 MiB)
    pub max_image_bytes: usize,
    /// Directory the image files are written to
    pub upload_dir: PathBuf,
    /// URL prefix recorded in image references
    pub url_prefix: String,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            max_images: 5,
            max_image_bytes: 10 * 1024 * 1024,
            upload_dir: PathBuf::from("uploads"),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
        }
    }
}

impl PropertyConfig {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Upper bound for a whole upload request: every image plus 1 MiB of form fields
    pub fn request_body_limit(&self) -> usize {
        self.max_images
            .saturating_mul(self.max_image_bytes)
            .saturating_add(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PropertyConfig::new("/tmp/uploads");
        assert_eq!(config.max_images, 5);
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
        assert_eq!(config.url_prefix, "/uploads");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/uploads"));
        assert_eq!(config.request_body_limit(), 51 * 1024 * 1024);
    }
}
