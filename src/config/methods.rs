//! Loading methods for `MailConfig`
//!
//! Configuration files are JSON; missing fields fall back to the builder
//! defaults and the result is validated like a built config.

use std::path::Path;

use super::types::MailConfig;
use crate::error::{MailError, MailResult};

impl MailConfig {
    /// Parse a JSON configuration document
    ///
    /// # Example
    /// ```rust
    /// # use inline_mailer::config::MailConfig;
    /// # fn main() -> inline_mailer::MailResult<()> {
    /// let config = MailConfig::from_json_str(r#"{ "default_subject": "Hello" }"#)?;
    /// assert_eq!(config.default_subject(), "Hello");
    /// assert_eq!(config.image_timeout_secs(), 30);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json_str(json: &str) -> MailResult<Self> {
        let config: MailConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> MailResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MailError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> MailResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
