//! Email message builder and send pipeline

pub mod address;
pub mod attachment;
pub mod email;
pub mod pipeline;

// Re-exports for public API
pub use address::Mailbox;
pub use attachment::{AttachmentRef, AttachmentResolver};
pub use email::{BodyType, EmailMessage, StylesheetSource};
pub use pipeline::PreparedBody;
