//! Image storage for product, category and slider assets.
//!
//! Files land under `<root>/<folder>/<unix_millis>-<name>` and are served
//! statically by the storefront under `/uploads`. The returned URL is what
//! gets stored in catalog rows.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use url::Url;

/// Maximum accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// File extensions accepted as images.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Errors from storing an uploaded image.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The upload carried no bytes.
    #[error("uploaded file is empty")]
    EmptyFile,

    /// The upload exceeds [`MAX_IMAGE_BYTES`].
    #[error("uploaded file is too large: {size} bytes (max {MAX_IMAGE_BYTES})")]
    TooLarge { size: usize },

    /// The file extension is not an accepted image type.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The target folder name contains disallowed characters.
    #[error("invalid upload folder: {0}")]
    InvalidFolder(String),

    /// Filesystem failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The public URL could not be built.
    #[error("invalid public URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A stored image: its path relative to the upload root and its public URL.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredImage {
    /// Path relative to the upload root, e.g. `products/1754400000000-teapot.jpg`.
    pub path: String,
    /// Public URL for catalog rows, e.g. `https://shop.example/uploads/products/...`.
    pub url: String,
}

/// Filesystem-backed image store.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base: Url,
}

impl ImageStore {
    /// Create an image store.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory uploads are written under
    /// * `public_base` - Base URL the storefront serves `/uploads` from
    pub fn new(root: impl Into<PathBuf>, public_base: Url) -> Self {
        Self {
            root: root.into(),
            public_base,
        }
    }

    /// Store an uploaded image and return its public URL.
    ///
    /// The stored filename is `<unix_millis>-<sanitized original name>`, so
    /// repeated uploads of the same file never collide.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for empty/oversized payloads, non-image
    /// extensions, bad folder names, or filesystem failures.
    pub async fn store(
        &self,
        folder: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::EmptyFile);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(StorageError::TooLarge { size: bytes.len() });
        }
        validate_folder(folder)?;

        let (stem, extension) = split_name(original_name);
        if !ALLOWED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()) {
            return Err(StorageError::UnsupportedType(extension.to_string()));
        }

        let file_name = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            sanitize_stem(stem),
            extension.to_ascii_lowercase()
        );

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        let relative = format!("{folder}/{file_name}");
        let url = self.public_base.join(&format!("uploads/{relative}"))?;

        tracing::debug!(path = %relative, size = bytes.len(), "stored image");

        Ok(StoredImage {
            path: relative,
            url: url.to_string(),
        })
    }

    /// The directory uploads are written under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Folders are single non-empty path segments of `[a-z0-9-_]`.
fn validate_folder(folder: &str) -> Result<(), StorageError> {
    let valid = !folder.is_empty()
        && folder
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidFolder(folder.to_string()))
    }
}

/// Split a filename into stem and extension.
fn split_name(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or((name, ""))
}

/// Reduce a filename stem to `[a-z0-9-]`, collapsing anything else to `-`.
fn sanitize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut last_dash = true;
    for c in stem.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_stem() {
        assert_eq!(sanitize_stem("Clay Teapot (2)"), "clay-teapot-2");
        assert_eq!(sanitize_stem("__weird__"), "weird");
        assert_eq!(sanitize_stem("???"), "image");
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("photo.final.JPG"), ("photo.final", "JPG"));
        assert_eq!(split_name("noext"), ("noext", ""));
    }

    #[test]
    fn test_validate_folder() {
        assert!(validate_folder("products").is_ok());
        assert!(validate_folder("slider_items").is_ok());
        assert!(validate_folder("").is_err());
        assert!(validate_folder("../etc").is_err());
        assert!(validate_folder("Products").is_err());
    }

    #[tokio::test]
    async fn test_store_rejects_empty_and_oversized() {
        let store = ImageStore::new(
            std::env::temp_dir().join("tamarind-test-uploads"),
            Url::parse("http://localhost:3000/").expect("url"),
        );

        let err = store.store("products", "a.png", &[]).await.expect_err("empty");
        assert!(matches!(err, StorageError::EmptyFile));

        let big = vec![0_u8; MAX_IMAGE_BYTES + 1];
        let err = store
            .store("products", "a.png", &big)
            .await
            .expect_err("oversized");
        assert!(matches!(err, StorageError::TooLarge { .. }));
    }

    #[tokio::test]
    async fn test_store_rejects_unknown_extension() {
        let store = ImageStore::new(
            std::env::temp_dir().join("tamarind-test-uploads"),
            Url::parse("http://localhost:3000/").expect("url"),
        );

        let err = store
            .store("products", "payload.exe", &[1, 2, 3])
            .await
            .expect_err("extension");
        assert!(matches!(err, StorageError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn test_store_writes_file_and_builds_url() {
        let root = std::env::temp_dir().join(format!(
            "tamarind-test-uploads-{}",
            std::process::id()
        ));
        let store = ImageStore::new(
            &root,
            Url::parse("http://localhost:3000/").expect("url"),
        );

        let stored = store
            .store("products", "Clay Teapot.JPG", &[0xFF, 0xD8, 0xFF])
            .await
            .expect("store");

        assert!(stored.path.starts_with("products/"));
        assert!(stored.path.ends_with("-clay-teapot.jpg"));
        assert!(
            stored
                .url
                .starts_with("http://localhost:3000/uploads/products/")
        );
        let on_disk = root.join(&stored.path);
        assert!(on_disk.exists());

        tokio::fs::remove_dir_all(&root).await.expect("cleanup");
    }
}
