//! Core configuration types for message preparation
//!
//! This module contains the `MailConfig` struct: sender defaults for new
//! messages and the settings of the image pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct for building and preparing messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Sender address applied to new messages
    pub(crate) default_from: Option<String>,
    pub(crate) default_from_name: Option<String>,
    pub(crate) default_subject: String,
    /// Initial body of new messages
    pub(crate) default_body: String,
    /// `text/plain` or `text/html`; anything else leaves the content type unset
    pub(crate) default_content_type: Option<String>,

    /// Directory embed temp files are written to.
    ///
    /// Must exist and be writable; nothing is created here besides
    /// the per-image files, which are removed after every send.
    pub(crate) temp_dir: PathBuf,
    pub(crate) temp_file_prefix: String,

    /// Directory relative `<img src>` paths are resolved against
    pub(crate) base_dir: Option<PathBuf>,

    /// Timeout in seconds for fetching remote image sources
    ///
    /// Default: 30 seconds
    pub(crate) image_timeout_secs: u64,

    /// Maximum size in bytes of a single image source.
    /// Larger images keep their original `src`.
    ///
    /// Default: 5MB
    pub(crate) max_image_size: usize,
}
