//! Transport that only logs
//!
//! Useful during development: nothing leaves the machine, the prepared mail
//! is written to the log instead.

use tracing::info;

use super::types::{OutgoingMail, Transport, TransportError};

/// Logs every message instead of delivering it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport {
    /// Also log the full body
    pub full: bool,
}

impl LogTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn full() -> Self {
        Self { full: true }
    }
}

impl Transport for LogTransport {
    fn send_mail(&self, mail: &OutgoingMail<'_>) -> Result<(), TransportError> {
        info!(
            to = ?mail.to,
            subject = %mail.subject,
            headers = ?mail.headers,
            attachments = mail.attachments.len(),
            embeds = mail.embeds.len(),
            body_bytes = mail.body.len(),
            "Sending mail"
        );

        mail.embed_hook().register(|embed| {
            info!(
                cid = %embed.id,
                name = %embed.display_name,
                content_type = %embed.content_type,
                path = %embed.temp_file_path.display(),
                "Embedded image"
            );
        });

        if self.full {
            info!("Body:\n{}", mail.body);
        }

        Ok(())
    }
}
