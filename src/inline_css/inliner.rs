//! Style inlining over a parsed DOM
//!
//! Inlineable selectors are evaluated against the document and their
//! declarations are appended to each match's `style` attribute. Selectors that
//! must stay in the head are collected, together with any externally supplied
//! head CSS, into a single `<style>` element appended to `<head>`.
//!
//! Every failure mode degrades to a no-op: an unusable document is returned
//! as-is, an unparseable selector is skipped, a missing `<head>` drops the
//! head block.

use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

use super::selector::{classify, SelectorPlacement};
use super::types::{InlineStyleTable, ParsedStylesheet};

/// Apply `table` and `head_buffer` to `html`
///
/// Selectors are processed in table order, matches in document order.
#[must_use]
pub fn inline(html: &str, table: &InlineStyleTable, head_buffer: &str) -> String {
    if table.is_empty() && head_buffer.is_empty() {
        return html.to_string();
    }

    let Some(document) = parse_document(html) else {
        log::debug!("No usable HTML document, skipping style inlining");
        return html.to_string();
    };

    let mut head_rules = String::new();
    let mut styled_elements = 0usize;

    for (selector, declarations) in table.iter() {
        if classify(selector) == SelectorPlacement::MustStayInHead {
            head_rules.push_str(selector);
            head_rules.push('{');
            head_rules.push_str(declarations);
            head_rules.push('}');
            continue;
        }

        if declarations.is_empty() {
            continue;
        }

        let Ok(matches) = document.select(selector) else {
            log::debug!("Skipping selector the DOM cannot evaluate: {selector}");
            continue;
        };

        // Attribute-only changes, so iterating the live selection is safe
        for node_ref in matches {
            let mut attrs = node_ref.attributes.borrow_mut();
            let style = append_declarations(attrs.get("style").unwrap_or(""), declarations);
            attrs.insert("style", style);
            styled_elements += 1;
        }
    }

    let mut head_css = String::with_capacity(head_buffer.len() + head_rules.len());
    head_css.push_str(head_buffer);
    head_css.push_str(&head_rules);

    if !head_css.is_empty() && !append_head_style(&document, &head_css) {
        log::debug!("Document has no <head>, dropping {} bytes of head CSS", head_css.len());
    }

    log::debug!(
        "Inlined {} selectors onto {styled_elements} elements",
        table.len()
    );

    serialize(&document).unwrap_or_else(|| html.to_string())
}

/// Apply a parsed stylesheet, routing head-only stylesheets verbatim to the head
#[must_use]
pub fn apply_stylesheet(html: &str, stylesheet: &ParsedStylesheet) -> String {
    if stylesheet.head_only {
        inline(html, &InlineStyleTable::new(), &stylesheet.normalized)
    } else {
        inline(html, &stylesheet.to_table(), "")
    }
}

/// Append `declarations` to an existing inline style value
///
/// The existing value is kept as written; a `;` is inserted only when it
/// does not already end a declaration.
fn append_declarations(existing: &str, declarations: &str) -> String {
    let mut style = String::with_capacity(existing.len() + declarations.len() + 1);
    style.push_str(existing);
    let last = existing.trim_end();
    if !last.is_empty() && !last.ends_with(';') {
        style.push(';');
    }
    style.push_str(declarations);
    style
}

/// Append a `<style>` element holding `css` to the document head
///
/// Returns `false` when the document has no head.
fn append_head_style(document: &NodeRef, css: &str) -> bool {
    let Ok(head) = document.select_first("head") else {
        return false;
    };

    // Build the empty element through the parser so it lands in the HTML
    // namespace; the CSS goes in as a text node and is never re-parsed
    let fragment = kuchiki::parse_html().one("<style type=\"text/css\"></style>");
    let Ok(style) = fragment.select_first("style") else {
        return false;
    };

    let style_node = style.as_node().clone();
    style_node.detach();
    style_node.append(NodeRef::new_text(css));
    head.as_node().append(style_node);
    true
}

pub(crate) fn parse_document(html: &str) -> Option<NodeRef> {
    if html.trim().is_empty() {
        return None;
    }

    let document = kuchiki::parse_html().one(html);
    document.select_first("html").ok()?;
    Some(document)
}

pub(crate) fn serialize(document: &NodeRef) -> Option<String> {
    let mut output = Vec::new();
    if let Err(e) = document.serialize(&mut output) {
        log::warn!("Failed to serialize HTML document: {e}");
        return None;
    }
    String::from_utf8(output).ok()
}
