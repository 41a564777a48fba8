//! Embedded images and their temporary files
//!
//! In attachment mode every resolved image is written to its own temporary
//! file so the transport can attach it as a related MIME part. The files are
//! owned by an [`EmbeddedImages`] collection which removes them on cleanup or,
//! failing that, when it is dropped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::utils::constants::DEFAULT_TEMP_FILE_PREFIX;

/// An image extracted from the HTML body and registered for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Unique token, used as the MIME Content-ID
    pub id: String,
    /// `alt` text of the image, or the id when there is none
    pub display_name: String,
    pub temp_file_path: PathBuf,
    pub content_type: String,
}

impl EmbeddedImage {
    /// `cid:` reference used in the rewritten `src` attribute
    #[must_use]
    pub fn cid_uri(&self) -> String {
        format!("cid:{}", self.id)
    }
}

/// Where embed temp files are created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedStore {
    dir: PathBuf,
    prefix: String,
}

impl Default for EmbedStore {
    fn default() -> Self {
        Self::new(std::env::temp_dir(), DEFAULT_TEMP_FILE_PREFIX)
    }
}

impl EmbedStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a new uniquely named temp file and describe it
    ///
    /// `create_new` makes an id collision fail instead of overwriting
    /// another message's file.
    pub fn create(
        &self,
        bytes: &[u8],
        content_type: &str,
        alt: Option<&str>,
    ) -> std::io::Result<EmbeddedImage> {
        let id = Uuid::new_v4().to_string();
        let path = self
            .dir
            .join(format!("{}{id}.{}", self.prefix, extension_for(content_type)));

        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        if let Err(e) = file.write_all(bytes) {
            drop(file);
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }

        debug!("Created embed temp file: {}", path.display());

        let display_name = alt
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map_or_else(|| id.clone(), ToString::to_string);

        Ok(EmbeddedImage {
            id,
            display_name,
            temp_file_path: path,
            content_type: content_type.to_string(),
        })
    }
}

/// File extension for an image content type
#[must_use]
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        other => mime_guess::get_mime_extensions_str(other)
            .and_then(|extensions| extensions.first().copied())
            .unwrap_or("bin"),
    }
}

/// The embeds of one outgoing message
///
/// Temp files are removed by [`crate::images::cleanup`]; anything still
/// listed when the collection is dropped is removed then.
#[derive(Debug, Default)]
pub struct EmbeddedImages {
    images: Vec<EmbeddedImage>,
}

impl EmbeddedImages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, image: EmbeddedImage) {
        self.images.push(image);
    }

    pub(crate) fn take_all(&mut self) -> Vec<EmbeddedImage> {
        std::mem::take(&mut self.images)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EmbeddedImage] {
        &self.images
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmbeddedImage> {
        self.images.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl<'a> IntoIterator for &'a EmbeddedImages {
    type Item = &'a EmbeddedImage;
    type IntoIter = std::slice::Iter<'a, EmbeddedImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

impl Drop for EmbeddedImages {
    fn drop(&mut self) {
        if !self.images.is_empty() {
            warn!(
                "{} embed temp files still registered at drop, cleaning up",
                self.images.len()
            );
            super::cleanup::cleanup(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_writes_unique_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = EmbedStore::new(dir.path(), "test_");

        let first = store.create(b"one", "image/png", Some("Logo")).unwrap();
        let second = store.create(b"two", "image/png", None).unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.temp_file_path, second.temp_file_path);
        assert_eq!(std::fs::read(&first.temp_file_path).unwrap(), b"one");
        assert_eq!(first.display_name, "Logo");
        assert_eq!(second.display_name, second.id);
        assert!(first.temp_file_path.starts_with(dir.path()));
        assert!(
            first
                .temp_file_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .ends_with(".png")
        );
    }

    #[test]
    fn test_blank_alt_falls_back_to_id() {
        let dir = tempfile::TempDir::new().unwrap();
        let image = EmbedStore::new(dir.path(), "")
            .create(b"x", "image/gif", Some("   "))
            .unwrap();

        assert_eq!(image.display_name, image.id);
        assert_eq!(image.cid_uri(), format!("cid:{}", image.id));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/svg+xml"), "svg");
        assert_eq!(extension_for("image/x-unknown-thing"), "bin");
    }

    #[test]
    fn test_drop_removes_remaining_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let image = EmbedStore::new(dir.path(), "")
            .create(b"x", "image/png", None)
            .unwrap();
        let path = image.temp_file_path.clone();

        let mut embeds = EmbeddedImages::new();
        embeds.push(image);
        assert!(path.exists());

        drop(embeds);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_directory_fails_creation() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = EmbedStore::new(dir.path().join("does-not-exist"), "");

        assert!(store.create(b"x", "image/png", None).is_err());
    }
}
