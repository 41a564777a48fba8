//! UTF-8-safe string helpers for log output

/// Maximum characters of an attribute value quoted in a log line
pub const LOG_VALUE_MAX_CHARS: usize = 80;

/// Truncate `s` to at most `max_chars` characters (not bytes).
///
/// Never splits a multi-byte character and never allocates.
///
/// # Examples
/// ```
/// # use inline_mailer::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("Grüße", 4), "Grüß");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
#[must_use]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Shorten an attribute value such as a `data:` URI for logging
#[inline]
#[must_use]
pub fn log_value(s: &str) -> &str {
    safe_truncate_chars(s, LOG_VALUE_MAX_CHARS)
}
