//! HTML email preparation
//!
//! Builds outgoing messages whose HTML bodies are made mail-client friendly:
//! stylesheet rules are inlined onto matching elements, rules that can not be
//! inlined are kept in a head `<style>` block, and `<img>` sources are turned
//! into `data:` URIs or `cid:` embeds backed by temp files.

pub mod config;
pub mod error;
pub mod images;
pub mod inline_css;
pub mod message;
pub mod transport;
pub mod utils;

pub use config::{MailConfig, MailConfigBuilder};
pub use error::{MailError, MailResult};
pub use images::{
    cleanup, resolve_images, DefaultSourceResolver, EmbedStore, EmbeddedImage, EmbeddedImages,
    ImageMode, ImageSource, ResolvedImages, SourceResolver,
};
pub use inline_css::{
    apply_stylesheet, classify, inline, parse, parse_with_mode, InlineStyleTable,
    ParsedStylesheet, SelectorPlacement, StyleRule,
};
pub use message::{
    AttachmentRef, AttachmentResolver, BodyType, EmailMessage, Mailbox, PreparedBody,
};
pub use transport::{
    EmbedHook, LogTransport, MemoryTransport, OutgoingMail, Transport, TransportError,
};
