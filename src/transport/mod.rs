//! Mail transport seam
//!
//! The crate prepares messages; delivery is done by a [`Transport`]
//! implementation supplied by the host.

pub mod log_transport;
pub mod memory;
pub mod types;

pub use log_transport::LogTransport;
pub use memory::{MemoryTransport, SentEmbed, SentMail};
pub use types::{EmbedHook, OutgoingMail, Transport, TransportError};
