//! Lenient stylesheet parsing
//!
//! This is deliberately not a CSS parser. Comments are stripped, whitespace is
//! collapsed and `selectors { declarations }` blocks are picked out with a
//! non-greedy pattern. Whatever the pattern matches is used; malformed input
//! yields fewer rules, never an error, so a broken stylesheet can not stop a
//! message from being sent.
//!
//! Global at-rules (`@media`, `@font-face`) can not be flattened into element
//! styles, and when one is present the stylesheet as a whole is marked
//! head-only instead of being partially inlined.

use lazy_static::lazy_static;
use regex::Regex;

use super::types::{ParsedStylesheet, StyleRule};

/// At-rules that force the whole stylesheet into the head
pub const HEAD_ONLY_AT_RULES: [&str; 2] = ["@media", "@font-face"];

lazy_static! {
    // Hardcoded patterns; a failure here is a programming error.
    static ref COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/")
        .expect("BUG: hardcoded comment pattern is invalid");

    static ref WHITESPACE: Regex = Regex::new(r"\s+")
        .expect("BUG: hardcoded whitespace pattern is invalid");

    static ref RULE_BLOCK: Regex = Regex::new(r"([^{}]*?)\{([^}]*?)\}")
        .expect("BUG: hardcoded rule block pattern is invalid");
}

/// Strip comments and collapse whitespace runs to a single space
#[must_use]
pub fn normalize(css: &str) -> String {
    let without_comments = COMMENT.replace_all(css, "");
    WHITESPACE
        .replace_all(&without_comments, " ")
        .trim()
        .to_string()
}

/// Parse `css` into inlineable rules
#[must_use]
pub fn parse(css: &str) -> ParsedStylesheet {
    parse_with_mode(css, false)
}

/// Parse `css`, optionally forcing head-only placement for the whole stylesheet
#[must_use]
pub fn parse_with_mode(css: &str, head_only_requested: bool) -> ParsedStylesheet {
    let normalized = normalize(css);

    let has_global_at_rule = HEAD_ONLY_AT_RULES
        .iter()
        .any(|at_rule| normalized.contains(at_rule));

    if head_only_requested || has_global_at_rule {
        log::debug!(
            "Stylesheet routed to head (requested: {head_only_requested}, at-rule: {has_global_at_rule})"
        );
        return ParsedStylesheet {
            head_only: true,
            rules: Vec::new(),
            normalized,
        };
    }

    let rules = RULE_BLOCK
        .captures_iter(&normalized)
        .filter_map(|captures| {
            let selectors: Vec<String> = captures[1]
                .split(',')
                .map(str::trim)
                .filter(|selector| !selector.is_empty())
                .map(ToString::to_string)
                .collect();

            if selectors.is_empty() {
                return None;
            }

            Some(StyleRule {
                selectors,
                declarations: captures[2].trim().to_string(),
            })
        })
        .collect();

    ParsedStylesheet {
        head_only: false,
        rules,
        normalized,
    }
}
