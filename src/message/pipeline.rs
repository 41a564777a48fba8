//! Body preparation and sending
//!
//! Preparation runs parse -> inline -> resolve images over the message's
//! configuration and returns the final HTML together with the embeds it
//! references. The message itself is never mutated, so the same message can
//! be prepared or sent several times.

use tracing::{debug, info, info_span, warn};

use super::email::{BodyType, EmailMessage};
use crate::error::MailResult;
use crate::images::{self, resolve_images, EmbeddedImages};
use crate::inline_css::{inline, parse_with_mode, InlineStyleTable};
use crate::transport::{OutgoingMail, Transport};

/// Final body of a message plus the embeds it references
///
/// Embeds own temp files. They are removed by [`images::cleanup`] or, as a
/// fallback, when the value is dropped.
#[derive(Debug)]
pub struct PreparedBody {
    pub html: String,
    pub embeds: EmbeddedImages,
}

impl EmailMessage {
    /// Header lines in send order
    ///
    /// `From`, `Reply-To` and `Content-Type` when set, then one `CC` line per
    /// cc recipient and one `BCC` line per bcc recipient.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(3 + self.cc.len() + self.bcc.len());

        if let Some(from) = &self.from {
            headers.push(format!("From: {from}"));
        }
        if let Some(reply_to) = &self.reply_to {
            headers.push(format!("Reply-To: {reply_to}"));
        }
        if let Some(content_type) = self.body_type.header_value() {
            headers.push(format!("Content-Type: {content_type}"));
        }
        headers.extend(self.cc.iter().map(|cc| format!("CC: {cc}")));
        headers.extend(self.bcc.iter().map(|bcc| format!("BCC: {bcc}")));

        headers
    }

    /// Run style inlining and image resolution over the body
    ///
    /// Plain text bodies are returned untouched. Every failure inside the
    /// pipeline degrades to leaving the affected part of the body as it was.
    #[must_use]
    pub fn prepare_body(&self) -> PreparedBody {
        if self.body_type == BodyType::PlainText {
            return PreparedBody {
                html: self.body.clone(),
                embeds: EmbeddedImages::new(),
            };
        }

        let html = self.inline_styles();

        match self.image_mode {
            Some(mode) => {
                let resolved =
                    resolve_images(&html, mode, self.source_resolver.as_ref(), &self.embed_store);
                PreparedBody {
                    html: resolved.html,
                    embeds: resolved.embeds,
                }
            }
            None => PreparedBody {
                html,
                embeds: EmbeddedImages::new(),
            },
        }
    }

    /// Prepare the body and hand the message to `transport`
    ///
    /// Temp files created for embeds are removed after the transport returns,
    /// whether or not delivery succeeded.
    pub fn send(&self, transport: &dyn Transport) -> MailResult<()> {
        let span = info_span!("send_mail", subject = %self.subject, recipients = self.to.len());
        let _guard = span.enter();

        let mut prepared = self.prepare_body();
        debug!(
            html_bytes = prepared.html.len(),
            embeds = prepared.embeds.len(),
            "Prepared message body"
        );

        let outcome = {
            let mail = OutgoingMail {
                to: self.to.iter().map(ToString::to_string).collect(),
                subject: self.subject.clone(),
                body: prepared.html,
                headers: self.headers(),
                attachments: self.attachments.clone(),
                embeds: prepared.embeds.as_slice(),
            };
            transport.send_mail(&mail)
        };

        images::cleanup(&mut prepared.embeds);

        match outcome {
            Ok(()) => {
                info!("Message handed to transport");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Transport failed to send message");
                Err(e.into())
            }
        }
    }

    /// Merge all registered stylesheets and inline them into the body
    fn inline_styles(&self) -> String {
        if self.stylesheets.is_empty() {
            return self.body.clone();
        }

        let mut table = InlineStyleTable::new();
        let mut head_buffer = String::new();

        for source in &self.stylesheets {
            let parsed = parse_with_mode(&source.css, source.head_only);
            if parsed.head_only {
                if !head_buffer.is_empty() && !parsed.normalized.is_empty() {
                    head_buffer.push(' ');
                }
                head_buffer.push_str(&parsed.normalized);
            } else {
                table.add_rules(&parsed.rules);
            }
        }

        inline(&self.body, &table, &head_buffer)
    }
}
