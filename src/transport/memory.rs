//! In-memory transport for tests
//!
//! Records every message it receives. Embed files are read during the
//! transport call, so a recorded embed proves its temp file existed while
//! the message was being sent.

use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{OutgoingMail, Transport, TransportError};

/// An embed as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmbed {
    pub id: String,
    pub display_name: String,
    pub content_type: String,
    pub temp_file_path: PathBuf,
    /// File content at send time, `None` if the file was missing
    pub bytes: Option<Vec<u8>>,
}

/// Owned copy of a delivered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub headers: Vec<String>,
    pub attachments: Vec<PathBuf>,
    pub embeds: Vec<SentEmbed>,
}

/// Transport that stores messages in memory
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<SentMail>>,
    reject_with: Option<String>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that records the message and then rejects it
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(reason.into()),
        }
    }

    /// Messages received so far
    #[must_use]
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<SentMail> {
        self.sent().pop()
    }
}

impl Transport for MemoryTransport {
    fn send_mail(&self, mail: &OutgoingMail<'_>) -> Result<(), TransportError> {
        let mut embeds = Vec::new();
        mail.embed_hook().register(|embed| {
            embeds.push(SentEmbed {
                id: embed.id.clone(),
                display_name: embed.display_name.clone(),
                content_type: embed.content_type.clone(),
                temp_file_path: embed.temp_file_path.clone(),
                bytes: std::fs::read(&embed.temp_file_path).ok(),
            });
        });

        let record = SentMail {
            to: mail.to.clone(),
            subject: mail.subject.clone(),
            body: mail.body.clone(),
            headers: mail.headers.clone(),
            attachments: mail.attachments.clone(),
            embeds,
        };

        self.sent
            .lock()
            .map_err(|_| TransportError::Unavailable("memory transport poisoned".to_string()))?
            .push(record);

        match &self.reject_with {
            Some(reason) => Err(TransportError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}
