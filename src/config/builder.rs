//! Builder for `MailConfig`
//!
//! Every field has a default, so the builder can be built straight away;
//! `build()` only rejects values the pipeline can not work with.

use std::path::PathBuf;

use super::types::MailConfig;
use crate::error::{MailError, MailResult};
use crate::utils::{
    DEFAULT_IMAGE_TIMEOUT_SECS, DEFAULT_MAX_IMAGE_SIZE, DEFAULT_SUBJECT, DEFAULT_TEMP_FILE_PREFIX,
};

#[derive(Debug, Clone)]
pub struct MailConfigBuilder {
    pub(crate) default_from: Option<String>,
    pub(crate) default_from_name: Option<String>,
    pub(crate) default_subject: String,
    pub(crate) default_body: String,
    pub(crate) default_content_type: Option<String>,
    pub(crate) temp_dir: PathBuf,
    pub(crate) temp_file_prefix: String,
    pub(crate) base_dir: Option<PathBuf>,
    pub(crate) image_timeout_secs: u64,
    pub(crate) max_image_size: usize,
}

impl Default for MailConfigBuilder {
    fn default() -> Self {
        Self {
            default_from: None,
            default_from_name: None,
            default_subject: DEFAULT_SUBJECT.to_string(),
            default_body: String::new(),
            default_content_type: None,
            temp_dir: std::env::temp_dir(),
            temp_file_prefix: DEFAULT_TEMP_FILE_PREFIX.to_string(),
            base_dir: None,
            image_timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        let builder = MailConfigBuilder::default();
        MailConfig {
            default_from: builder.default_from,
            default_from_name: builder.default_from_name,
            default_subject: builder.default_subject,
            default_body: builder.default_body,
            default_content_type: builder.default_content_type,
            temp_dir: builder.temp_dir,
            temp_file_prefix: builder.temp_file_prefix,
            base_dir: builder.base_dir,
            image_timeout_secs: builder.image_timeout_secs,
            max_image_size: builder.max_image_size,
        }
    }
}

impl MailConfig {
    /// Create a builder for configuring a `MailConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> MailConfigBuilder {
        MailConfigBuilder::default()
    }
}

impl MailConfigBuilder {
    /// Sender address for new messages, with an optional display name
    #[must_use]
    pub fn default_from(mut self, email: impl Into<String>, name: Option<&str>) -> Self {
        self.default_from = Some(email.into());
        self.default_from_name = name.map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn default_subject(mut self, subject: impl Into<String>) -> Self {
        self.default_subject = subject.into();
        self
    }

    #[must_use]
    pub fn default_body(mut self, body: impl Into<String>) -> Self {
        self.default_body = body.into();
        self
    }

    /// Content type header for new messages, `text/plain` or `text/html`
    #[must_use]
    pub fn default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = Some(content_type.into());
        self
    }

    /// Directory for embed temp files
    ///
    /// # Example
    /// ```rust
    /// # use inline_mailer::config::MailConfig;
    /// # fn main() -> inline_mailer::MailResult<()> {
    /// let config = MailConfig::builder()
    ///     .temp_dir("/var/spool/mailer")
    ///     .temp_file_prefix("outgoing_")
    ///     .build()?;
    /// assert_eq!(config.temp_file_prefix(), "outgoing_");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    #[must_use]
    pub fn temp_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_file_prefix = prefix.into();
        self
    }

    /// Directory relative image paths are resolved against
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn image_timeout_secs(mut self, secs: u64) -> Self {
        self.image_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn max_image_size(mut self, bytes: usize) -> Self {
        self.max_image_size = bytes;
        self
    }

    pub fn build(self) -> MailResult<MailConfig> {
        let config = MailConfig {
            default_from: self.default_from,
            default_from_name: self.default_from_name,
            default_subject: self.default_subject,
            default_body: self.default_body,
            default_content_type: self.default_content_type,
            temp_dir: self.temp_dir,
            temp_file_prefix: self.temp_file_prefix,
            base_dir: self.base_dir,
            image_timeout_secs: self.image_timeout_secs,
            max_image_size: self.max_image_size,
        };
        config.validate()?;
        Ok(config)
    }
}

impl MailConfig {
    /// Check the invariants the builder enforces, also used after deserializing
    pub fn validate(&self) -> MailResult<()> {
        if self.temp_dir.as_os_str().is_empty() {
            return Err(MailError::Config("temp_dir must not be empty".to_string()));
        }
        if self.max_image_size == 0 {
            return Err(MailError::Config(
                "max_image_size must be greater than zero".to_string(),
            ));
        }
        if self.image_timeout_secs == 0 {
            return Err(MailError::Config(
                "image_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.temp_file_prefix.contains(['/', '\\']) {
            return Err(MailError::Config(format!(
                "temp_file_prefix '{}' must not contain path separators",
                self.temp_file_prefix
            )));
        }
        Ok(())
    }
}
