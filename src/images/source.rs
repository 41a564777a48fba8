//! Image source lookup
//!
//! Turns the value of an `<img src>` attribute into raw bytes and a content
//! type. The default resolver reads local files and fetches `http(s)` URLs with
//! a blocking client; anything else (including `data:` URIs) is reported as
//! not found so the caller leaves the element alone.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::config::MailConfig;
use crate::utils::constants::{DEFAULT_IMAGE_TIMEOUT_SECS, DEFAULT_MAX_IMAGE_SIZE, MAILER_USER_AGENT};
use crate::utils::log_value;

/// Raw image content with its detected content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub bytes: Vec<u8>,
    /// Lowercase MIME essence, e.g. `image/png`
    pub content_type: String,
}

impl ImageSource {
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: normalize_content_type(&content_type.into()),
        }
    }

    /// Whether the detected type is an image type
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Lookup collaborator used by the image resolver
pub trait SourceResolver {
    /// Resolve `src` to content, `None` when it can not be obtained
    fn resolve(&self, src: &str) -> Option<ImageSource>;
}

impl<F> SourceResolver for F
where
    F: Fn(&str) -> Option<ImageSource>,
{
    fn resolve(&self, src: &str) -> Option<ImageSource> {
        self(src)
    }
}

/// Reasons a source could not be read. Only ever logged.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("image too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported source: {0}")]
    Unsupported(String),
}

/// Filesystem and HTTP resolver
#[derive(Debug)]
pub struct DefaultSourceResolver {
    base_dir: Option<PathBuf>,
    timeout: Duration,
    max_size: usize,
    client: OnceLock<Option<Client>>,
}

impl Default for DefaultSourceResolver {
    fn default() -> Self {
        Self {
            base_dir: None,
            timeout: Duration::from_secs(DEFAULT_IMAGE_TIMEOUT_SECS),
            max_size: DEFAULT_MAX_IMAGE_SIZE,
            client: OnceLock::new(),
        }
    }
}

impl DefaultSourceResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver using the base directory, timeout and size limit of `config`
    #[must_use]
    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            base_dir: config.base_dir().map(Path::to_path_buf),
            timeout: Duration::from_secs(config.image_timeout_secs()),
            max_size: config.max_image_size(),
            client: OnceLock::new(),
        }
    }

    /// Directory relative sources are resolved against
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, bytes: usize) -> Self {
        self.max_size = bytes;
        self
    }

    fn try_resolve(&self, src: &str) -> Result<ImageSource, SourceError> {
        let src = src.trim();

        match Url::parse(src) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => self.fetch(url),
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| SourceError::Unsupported(src.to_string()))?;
                self.read_file(&path)
            }
            // Single-letter schemes are Windows drive letters
            Ok(url) if url.scheme().len() == 1 => self.read_file(Path::new(src)),
            Ok(url) => Err(SourceError::Unsupported(format!("{} scheme", url.scheme()))),
            Err(_) => self.read_file(&self.local_path(src)),
        }
    }

    fn local_path(&self, src: &str) -> PathBuf {
        let path = Path::new(src);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn read_file(&self, path: &Path) -> Result<ImageSource, SourceError> {
        let size = std::fs::metadata(path)?.len();
        if size > self.max_size as u64 {
            return Err(SourceError::TooLarge {
                size,
                limit: self.max_size,
            });
        }

        let bytes = std::fs::read(path)?;
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");

        Ok(ImageSource::new(bytes, content_type))
    }

    fn client(&self) -> Option<&Client> {
        self.client
            .get_or_init(|| {
                Client::builder()
                    .timeout(self.timeout)
                    .user_agent(MAILER_USER_AGENT)
                    .build()
                    .map_err(|e| log::warn!("Failed to build HTTP client for image sources: {e}"))
                    .ok()
            })
            .as_ref()
    }

    fn fetch(&self, url: Url) -> Result<ImageSource, SourceError> {
        let Some(client) = self.client() else {
            return Err(SourceError::Unsupported("no HTTP client".to_string()));
        };

        let response = client
            .get(url.clone())
            .header("Accept", "image/avif,image/webp,image/apng,image/*,*/*;q=0.8")
            .send()?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        // Enforce the limit before reading the body when the server tells us the size
        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > self.max_size as u64 {
            return Err(SourceError::TooLarge {
                size: expected_size,
                limit: self.max_size,
            });
        }

        let header_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        // Chunked responses carry no length, so the cap is enforced while reading
        let limit = self.max_size as u64;
        let mut bytes = Vec::with_capacity(expected_size.min(limit) as usize);
        response.take(limit + 1).read_to_end(&mut bytes)?;
        if bytes.len() > self.max_size {
            return Err(SourceError::TooLarge {
                size: bytes.len() as u64,
                limit: self.max_size,
            });
        }

        let content_type = header_type.unwrap_or_else(|| {
            mime_guess::from_path(url.path())
                .first_raw()
                .unwrap_or("application/octet-stream")
                .to_string()
        });

        Ok(ImageSource::new(bytes, content_type))
    }
}

impl SourceResolver for DefaultSourceResolver {
    fn resolve(&self, src: &str) -> Option<ImageSource> {
        match self.try_resolve(src) {
            Ok(source) => Some(source),
            Err(e) => {
                log::debug!("Image source {} not available: {e}", log_value(src));
                None
            }
        }
    }
}

/// Lowercase MIME essence without parameters
fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    #[test]
    fn test_content_type_is_normalized() {
        let source = ImageSource::new(Vec::new(), "Image/PNG; charset=binary");
        assert_eq!(source.content_type, "image/png");
        assert!(source.is_image());
    }

    #[test]
    fn test_reads_relative_file_from_base_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.png"), PNG_BYTES).unwrap();

        let resolver = DefaultSourceResolver::new().with_base_dir(dir.path());
        let source = resolver.resolve("logo.png").unwrap();

        assert_eq!(source.bytes, PNG_BYTES);
        assert_eq!(source.content_type, "image/png");
    }

    #[test]
    fn test_reads_file_url() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let source = DefaultSourceResolver::new().resolve(url.as_str()).unwrap();
        assert_eq!(source.content_type, "image/gif");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let resolver = DefaultSourceResolver::new().with_base_dir(dir.path());

        assert!(resolver.resolve("missing.jpg").is_none());
    }

    #[test]
    fn test_data_uri_is_not_found() {
        let resolver = DefaultSourceResolver::new();
        assert!(resolver.resolve("data:image/png;base64,iVBORw0KGgo=").is_none());
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("big.png"), vec![0u8; 64]).unwrap();

        let resolver = DefaultSourceResolver::new()
            .with_base_dir(dir.path())
            .with_max_size(16);
        assert!(resolver.resolve("big.png").is_none());
    }

    #[test]
    fn test_fetches_http_image() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/img/logo.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(PNG_BYTES)
            .create();

        let source = DefaultSourceResolver::new()
            .resolve(&format!("{}/img/logo.png", server.url()))
            .unwrap();

        mock.assert();
        assert_eq!(source.bytes, PNG_BYTES);
        assert_eq!(source.content_type, "image/png");
    }

    #[test]
    fn test_http_error_status_is_not_found() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/gone.png").with_status(404).create();

        let resolver = DefaultSourceResolver::new();
        assert!(resolver.resolve(&format!("{}/gone.png", server.url())).is_none());
    }

    #[test]
    fn test_chunked_response_over_limit_is_rejected() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/stream.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_chunked_body(|w| {
                for _ in 0..8 {
                    w.write_all(&[0u8; 1024])?;
                }
                Ok(())
            })
            .create();

        let resolver = DefaultSourceResolver::new().with_max_size(4096);
        let err = resolver
            .try_resolve(&format!("{}/stream.png", server.url()))
            .unwrap_err();

        assert!(
            matches!(err, SourceError::TooLarge { size: 4097, limit: 4096 }),
            "{err}"
        );
    }

    #[test]
    fn test_chunked_response_within_limit_is_read() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/small.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_chunked_body(|w| w.write_all(PNG_BYTES))
            .create();

        let source = DefaultSourceResolver::new()
            .with_max_size(PNG_BYTES.len())
            .resolve(&format!("{}/small.png", server.url()))
            .unwrap();

        assert_eq!(source.bytes, PNG_BYTES);
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |src: &str| (src == "a.png").then(|| ImageSource::new(vec![1], "image/png"));

        assert!(resolver.resolve("a.png").is_some());
        assert!(resolver.resolve("b.png").is_none());
    }
}
