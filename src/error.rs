//! Error types for message sending
//!
//! Styling and image problems never surface here; they degrade the body and
//! are logged. Only configuration problems and transport failures reach the
//! caller.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for mailer operations
pub type MailResult<T> = Result<T, MailError>;

/// Error types for mailer operations
#[derive(Debug, Error)]
pub enum MailError {
    /// The transport did not accept the message
    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MailError {
    /// Whether the failure came from the transport rather than local setup
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, MailError::Transport(_))
    }
}
