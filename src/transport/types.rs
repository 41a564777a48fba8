//! Outgoing mail handed to a transport

use std::path::PathBuf;

use thiserror::Error;

use crate::images::EmbeddedImage;

/// Failure reported by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// The message was refused, e.g. by the relay
    #[error("message rejected: {0}")]
    Rejected(String),

    /// The transport could not be reached or is not configured
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// A fully prepared message
///
/// Borrowed embeds stay valid, and their temp files on disk, for the
/// duration of the transport call only.
#[derive(Debug, Clone)]
pub struct OutgoingMail<'a> {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    /// Header lines such as `From: a@example.com`
    pub headers: Vec<String>,
    pub attachments: Vec<PathBuf>,
    pub embeds: &'a [EmbeddedImage],
}

impl<'a> OutgoingMail<'a> {
    /// Hook for transports that register embeds from a callback
    ///
    /// The hook closes over the embed list computed before the send; it
    /// never sees embeds created later.
    #[must_use]
    pub fn embed_hook(&self) -> EmbedHook<'a> {
        EmbedHook {
            embeds: self.embeds,
        }
    }
}

/// Registers the already-computed embeds with a transport callback
///
/// Consumed by [`EmbedHook::register`], so one hook registers each embed
/// exactly once.
#[derive(Debug)]
pub struct EmbedHook<'a> {
    embeds: &'a [EmbeddedImage],
}

impl EmbedHook<'_> {
    /// Invoke `register` once for every embed, in document order
    pub fn register(self, mut register: impl FnMut(&EmbeddedImage)) {
        for embed in self.embeds {
            register(embed);
        }
    }
}

/// Mail transport collaborator
pub trait Transport {
    /// Deliver `mail`; embeds must be attached with their id as Content-ID
    fn send_mail(&self, mail: &OutgoingMail<'_>) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send_mail(&self, mail: &OutgoingMail<'_>) -> Result<(), TransportError> {
        (**self).send_mail(mail)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_mail(&self, mail: &OutgoingMail<'_>) -> Result<(), TransportError> {
        (**self).send_mail(mail)
    }
}
