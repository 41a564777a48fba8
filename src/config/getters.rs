//! Getter methods for `MailConfig`

use std::path::Path;

use super::types::MailConfig;
use crate::images::EmbedStore;

impl MailConfig {
    #[must_use]
    pub fn default_from(&self) -> Option<&str> {
        self.default_from.as_deref()
    }

    #[must_use]
    pub fn default_from_name(&self) -> Option<&str> {
        self.default_from_name.as_deref()
    }

    #[must_use]
    pub fn default_subject(&self) -> &str {
        &self.default_subject
    }

    #[must_use]
    pub fn default_body(&self) -> &str {
        &self.default_body
    }

    #[must_use]
    pub fn default_content_type(&self) -> Option<&str> {
        self.default_content_type.as_deref()
    }

    #[must_use]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    #[must_use]
    pub fn temp_file_prefix(&self) -> &str {
        &self.temp_file_prefix
    }

    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    #[must_use]
    pub fn image_timeout_secs(&self) -> u64 {
        self.image_timeout_secs
    }

    #[must_use]
    pub fn max_image_size(&self) -> usize {
        self.max_image_size
    }

    /// Embed store writing into the configured temp dir
    #[must_use]
    pub fn embed_store(&self) -> EmbedStore {
        EmbedStore::new(&self.temp_dir, &self.temp_file_prefix)
    }
}
