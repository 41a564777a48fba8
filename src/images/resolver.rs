//! `<img>` source rewriting
//!
//! Every image element is looked up through a [`SourceResolver`]. Resolved
//! images are either inlined as base64 `data:` URIs or written to a temp file
//! and referenced through `cid:<id>`. Images that can not be resolved keep
//! their original `src`; a partially resolved body still gets sent.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::embed::{EmbedStore, EmbeddedImages};
use super::source::{ImageSource, SourceResolver};
use crate::inline_css::inliner::{parse_document, serialize};
use crate::utils::log_value;

/// How resolved images are carried in the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// `src` becomes a self-contained `data:` URI
    Base64,
    /// `src` becomes `cid:<id>` and the image is embedded by the transport
    Attachment,
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageMode::Base64 => write!(f, "base64"),
            ImageMode::Attachment => write!(f, "attachment"),
        }
    }
}

impl FromStr for ImageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" | "data" => Ok(ImageMode::Base64),
            "attachment" | "cid" | "embed" => Ok(ImageMode::Attachment),
            other => Err(format!("unknown image mode '{other}'")),
        }
    }
}

/// Rewritten HTML plus the embeds created for it
#[derive(Debug)]
pub struct ResolvedImages {
    pub html: String,
    pub embeds: EmbeddedImages,
}

impl ResolvedImages {
    fn unchanged(html: &str) -> Self {
        Self {
            html: html.to_string(),
            embeds: EmbeddedImages::new(),
        }
    }
}

/// Resolve and rewrite every `<img>` of `html`
///
/// In [`ImageMode::Attachment`] each resolved image creates one temp file in
/// `store`; the caller owns the returned embeds and must clean them up after
/// the send.
#[must_use]
pub fn resolve_images(
    html: &str,
    mode: ImageMode,
    source: &dyn SourceResolver,
    store: &EmbedStore,
) -> ResolvedImages {
    let Some(document) = parse_document(html) else {
        return ResolvedImages::unchanged(html);
    };

    let images: Vec<_> = match document.select("img") {
        Ok(matches) => matches.collect(),
        Err(()) => Vec::new(),
    };
    if images.is_empty() {
        return ResolvedImages::unchanged(html);
    }

    let mut embeds = EmbeddedImages::new();
    let mut rewritten = 0usize;

    for node_ref in &images {
        let (src, alt) = {
            let attrs = node_ref.attributes.borrow();
            (
                attrs.get("src").map(ToString::to_string),
                attrs.get("alt").map(ToString::to_string),
            )
        };

        let Some(src) = src.filter(|src| !src.trim().is_empty()) else {
            continue;
        };

        let Some(image) = source.resolve(&src).filter(ImageSource::is_image) else {
            log::debug!("Leaving image unresolved: {}", log_value(&src));
            continue;
        };

        let new_src = match mode {
            ImageMode::Base64 => data_uri(&image),
            ImageMode::Attachment => {
                match store.create(&image.bytes, &image.content_type, alt.as_deref()) {
                    Ok(embedded) => {
                        let cid = embedded.cid_uri();
                        embeds.push(embedded);
                        cid
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to write temp file for image {} in {}: {e}",
                            log_value(&src),
                            store.dir().display()
                        );
                        continue;
                    }
                }
            }
        };

        node_ref.attributes.borrow_mut().insert("src", new_src);
        rewritten += 1;
    }

    log::debug!(
        "Resolved {rewritten} of {} images ({mode} mode, {} embeds)",
        images.len(),
        embeds.len()
    );

    if rewritten == 0 {
        return ResolvedImages::unchanged(html);
    }

    match serialize(&document) {
        Some(html) => ResolvedImages { html, embeds },
        // Embeds dropped here remove their files, nothing references them
        None => ResolvedImages::unchanged(html),
    }
}

/// `data:<content-type>;base64,<bytes>`
#[must_use]
pub fn data_uri(image: &ImageSource) -> String {
    let encoded_capacity = base64::encoded_len(image.bytes.len(), true).unwrap_or(0);
    let mut uri = String::with_capacity(encoded_capacity + 13 + image.content_type.len());

    uri.push_str("data:");
    uri.push_str(&image.content_type);
    uri.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(&image.bytes, &mut uri);

    uri
}
