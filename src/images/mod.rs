//! Embedded image resolution
//!
//! This module rewrites `<img>` sources of an HTML body into base64 `data:`
//! URIs or `cid:` references backed by temporary files, and removes those
//! files again once the message has been handed to the transport.

// Sub-modules
pub mod cleanup;
pub mod embed;
pub mod resolver;
pub mod source;

// Re-exports for public API
pub use cleanup::cleanup;
pub use embed::{EmbedStore, EmbeddedImage, EmbeddedImages};
pub use resolver::{data_uri, resolve_images, ImageMode, ResolvedImages};
pub use source::{DefaultSourceResolver, ImageSource, SourceError, SourceResolver};
