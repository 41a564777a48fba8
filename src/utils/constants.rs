//! Shared configuration constants for inline_mailer
//!
//! Default values used by the configuration builder and the image source
//! resolver, kept in one place to avoid magic numbers.

/// Subject used when a message is created without one
pub const DEFAULT_SUBJECT: &str = "New message";

/// File name prefix of embed temp files
///
/// Makes leftovers of crashed processes easy to recognise in the temp dir.
pub const DEFAULT_TEMP_FILE_PREFIX: &str = "inline_mailer_";

/// Timeout for fetching remote image sources: 30 seconds
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 30;

/// Maximum size of a single image source: 5MB
///
/// Larger images are left unresolved rather than bloating the message.
/// Typical email images: 10-500KB.
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// User agent sent when fetching remote image sources
pub const MAILER_USER_AGENT: &str = concat!("inline_mailer/", env!("CARGO_PKG_VERSION"));
