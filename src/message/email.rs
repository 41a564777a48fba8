//! Message builder
//!
//! `EmailMessage` only collects configuration: addresses, subject, body,
//! attachments and the styling/image options. Nothing is processed until the
//! message is prepared for sending, see [`super::pipeline`].

use std::fmt;
use std::sync::Arc;

use super::address::Mailbox;
use super::attachment::{resolve_attachment, AttachmentRef, AttachmentResolver};
use crate::config::MailConfig;
use crate::images::{DefaultSourceResolver, EmbedStore, ImageMode, SourceResolver};

/// Content type header of the message body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    /// No `Content-Type` header; the body is still treated as HTML
    #[default]
    Unspecified,
    PlainText,
    Html,
}

impl BodyType {
    /// Header value, `None` when no header is sent
    #[must_use]
    pub fn header_value(self) -> Option<&'static str> {
        match self {
            BodyType::Unspecified => None,
            BodyType::PlainText => Some("text/plain"),
            BodyType::Html => Some("text/html"),
        }
    }

    /// Accepts only `text/plain` and `text/html`; anything else is unspecified
    #[must_use]
    pub fn from_header_value(value: &str) -> Self {
        match value.trim() {
            "text/plain" => BodyType::PlainText,
            "text/html" => BodyType::Html,
            _ => BodyType::Unspecified,
        }
    }
}

/// A stylesheet registered on a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetSource {
    pub css: String,
    /// Place the stylesheet in the head without inlining anything
    pub head_only: bool,
}

/// An outgoing email under construction
pub struct EmailMessage {
    pub(crate) from: Option<Mailbox>,
    pub(crate) reply_to: Option<Mailbox>,
    pub(crate) to: Vec<Mailbox>,
    pub(crate) cc: Vec<Mailbox>,
    pub(crate) bcc: Vec<Mailbox>,
    pub(crate) subject: String,
    pub(crate) body: String,
    pub(crate) body_type: BodyType,
    pub(crate) attachments: Vec<std::path::PathBuf>,
    pub(crate) stylesheets: Vec<StylesheetSource>,
    pub(crate) image_mode: Option<ImageMode>,
    pub(crate) embed_store: EmbedStore,
    pub(crate) source_resolver: Arc<dyn SourceResolver + Send + Sync>,
    pub(crate) attachment_resolver: Option<Arc<dyn AttachmentResolver + Send + Sync>>,
}

impl EmailMessage {
    /// New message seeded with the sender, subject, body and content type
    /// defaults of `config`
    #[must_use]
    pub fn new(config: &MailConfig) -> Self {
        let from = config
            .default_from()
            .and_then(|email| Mailbox::parse(email, config.default_from_name()));

        Self {
            from,
            reply_to: None,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: config.default_subject().to_string(),
            body: config.default_body().to_string(),
            body_type: config
                .default_content_type()
                .map_or(BodyType::Unspecified, BodyType::from_header_value),
            attachments: Vec::new(),
            stylesheets: Vec::new(),
            image_mode: None,
            embed_store: config.embed_store(),
            source_resolver: Arc::new(DefaultSourceResolver::from_config(config)),
            attachment_resolver: None,
        }
    }

    /// Set the sender; an invalid address leaves the current sender in place
    pub fn set_from(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        match Mailbox::parse(email, name) {
            Some(mailbox) => self.from = Some(mailbox),
            None => log::debug!("Ignoring invalid sender address: {email}"),
        }
        self
    }

    /// Set the reply-to address; invalid addresses are ignored
    pub fn set_reply_to(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        match Mailbox::parse(email, name) {
            Some(mailbox) => self.reply_to = Some(mailbox),
            None => log::debug!("Ignoring invalid reply-to address: {email}"),
        }
        self
    }

    pub fn as_plain_text(&mut self) -> &mut Self {
        self.body_type = BodyType::PlainText;
        self
    }

    pub fn as_html(&mut self) -> &mut Self {
        self.body_type = BodyType::Html;
        self
    }

    pub fn set_body_type(&mut self, body_type: BodyType) -> &mut Self {
        self.body_type = body_type;
        self
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = subject.into();
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn add_to(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        push_valid(&mut self.to, email, name, "to");
        self
    }

    pub fn add_cc(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        push_valid(&mut self.cc, email, name, "cc");
        self
    }

    pub fn add_bcc(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        push_valid(&mut self.bcc, email, name, "bcc");
        self
    }

    /// Attach a file; references that do not resolve to a file are ignored
    pub fn add_attachment(&mut self, attachment: impl Into<AttachmentRef>) -> &mut Self {
        let attachment = attachment.into();
        match resolve_attachment(&attachment, self.attachment_resolver.as_deref()) {
            Some(path) => self.attachments.push(path),
            None => log::debug!("Ignoring unresolvable attachment: {attachment:?}"),
        }
        self
    }

    /// Resolver for [`AttachmentRef::Host`] references
    pub fn with_attachment_resolver(
        &mut self,
        resolver: impl AttachmentResolver + Send + Sync + 'static,
    ) -> &mut Self {
        self.attachment_resolver = Some(Arc::new(resolver));
        self
    }

    /// Inline `css` into the HTML body when the message is sent
    ///
    /// Several stylesheets may be added; they apply in the order added.
    pub fn with_stylesheet(&mut self, css: impl Into<String>) -> &mut Self {
        self.stylesheets.push(StylesheetSource {
            css: css.into(),
            head_only: false,
        });
        self
    }

    /// Place `css` in the document head without inlining it
    pub fn with_head_stylesheet(&mut self, css: impl Into<String>) -> &mut Self {
        self.stylesheets.push(StylesheetSource {
            css: css.into(),
            head_only: true,
        });
        self
    }

    /// Resolve `<img>` sources of the HTML body when the message is sent
    pub fn embed_images(&mut self, mode: ImageMode) -> &mut Self {
        self.image_mode = Some(mode);
        self
    }

    /// Replace the image source lookup, e.g. to serve images from memory
    pub fn with_source_resolver(
        &mut self,
        resolver: impl SourceResolver + Send + Sync + 'static,
    ) -> &mut Self {
        self.source_resolver = Arc::new(resolver);
        self
    }

    pub fn with_embed_store(&mut self, store: EmbedStore) -> &mut Self {
        self.embed_store = store;
        self
    }

    #[must_use]
    pub fn from(&self) -> Option<&Mailbox> {
        self.from.as_ref()
    }

    #[must_use]
    pub fn reply_to(&self) -> Option<&Mailbox> {
        self.reply_to.as_ref()
    }

    #[must_use]
    pub fn to(&self) -> &[Mailbox] {
        &self.to
    }

    #[must_use]
    pub fn cc(&self) -> &[Mailbox] {
        &self.cc
    }

    #[must_use]
    pub fn bcc(&self) -> &[Mailbox] {
        &self.bcc
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    #[must_use]
    pub fn attachments(&self) -> &[std::path::PathBuf] {
        &self.attachments
    }

    #[must_use]
    pub fn stylesheets(&self) -> &[StylesheetSource] {
        &self.stylesheets
    }

    #[must_use]
    pub fn image_mode(&self) -> Option<ImageMode> {
        self.image_mode
    }
}

impl fmt::Debug for EmailMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailMessage")
            .field("from", &self.from)
            .field("reply_to", &self.reply_to)
            .field("to", &self.to)
            .field("cc", &self.cc)
            .field("bcc", &self.bcc)
            .field("subject", &self.subject)
            .field("body_type", &self.body_type)
            .field("attachments", &self.attachments)
            .field("stylesheets", &self.stylesheets.len())
            .field("image_mode", &self.image_mode)
            .field("embed_store", &self.embed_store)
            .finish_non_exhaustive()
    }
}

fn push_valid(list: &mut Vec<Mailbox>, email: &str, name: Option<&str>, field: &str) {
    match Mailbox::parse(email, name) {
        Some(mailbox) => list.push(mailbox),
        None => log::debug!("Ignoring invalid {field} address: {email}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> MailConfig {
        MailConfig::builder()
            .default_from("site@example.com", Some("Example Site"))
            .default_subject("New message from Example")
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let message = EmailMessage::new(&config());

        assert_eq!(message.from().unwrap().to_string(), "Example Site <site@example.com>");
        assert_eq!(message.subject(), "New message from Example");
        assert_eq!(message.body_type(), BodyType::Unspecified);
    }

    #[test]
    fn test_new_uses_configured_body_and_content_type() {
        let config = MailConfig::builder()
            .default_body("<p>Hello</p>")
            .default_content_type("text/html")
            .build()
            .unwrap();
        let message = EmailMessage::new(&config);

        assert_eq!(message.body(), "<p>Hello</p>");
        assert_eq!(message.body_type(), BodyType::Html);
        assert_eq!(message.headers(), vec!["Content-Type: text/html"]);
    }

    #[test]
    fn test_unknown_configured_content_type_is_unspecified() {
        let config = MailConfig::builder()
            .default_content_type("application/json")
            .build()
            .unwrap();

        assert_eq!(EmailMessage::new(&config).body_type(), BodyType::Unspecified);
    }

    #[test]
    fn test_invalid_addresses_are_ignored() {
        let mut message = EmailMessage::new(&config());
        message
            .set_from("not an email", None)
            .add_to("a@example.com", None)
            .add_to("broken", Some("Broken"))
            .add_cc("c@example.com", Some("C"))
            .add_bcc("@nope", None);

        assert_eq!(message.from().unwrap().email(), "site@example.com");
        assert_eq!(message.to().len(), 1);
        assert_eq!(message.cc()[0].to_string(), "C <c@example.com>");
        assert!(message.bcc().is_empty());
    }

    #[test]
    fn test_content_type_switches() {
        let mut message = EmailMessage::new(&config());
        message.as_plain_text();
        assert_eq!(message.body_type(), BodyType::PlainText);
        message.as_html();
        assert_eq!(message.body_type(), BodyType::Html);
        assert_eq!(BodyType::from_header_value("application/json"), BodyType::Unspecified);
    }

    #[test]
    fn test_attachments_by_path_and_host_id() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let host_path = file.path().to_path_buf();
        let mut message = EmailMessage::new(&config());

        message
            .with_attachment_resolver(move |id: &str| (id == "15").then(|| host_path.clone()))
            .add_attachment(file.path())
            .add_attachment(AttachmentRef::Host("15".to_string()))
            .add_attachment(AttachmentRef::Host("16".to_string()))
            .add_attachment(PathBuf::from("/definitely/not/here.pdf"));

        assert_eq!(message.attachments().len(), 2);
    }

    #[test]
    fn test_stylesheets_accumulate_in_order() {
        let mut message = EmailMessage::new(&config());
        message
            .with_stylesheet("p { color: red; }")
            .with_head_stylesheet("a:hover { color: blue; }");

        assert_eq!(message.stylesheets().len(), 2);
        assert!(!message.stylesheets()[0].head_only);
        assert!(message.stylesheets()[1].head_only);
    }
}
