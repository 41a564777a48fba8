//! Shared helpers for the inline_mailer integration tests

use std::path::{Path, PathBuf};

use inline_mailer::{EmailMessage, MailConfig};
use tempfile::TempDir;

/// PNG signature plus the start of an IHDR chunk, enough for byte comparisons
#[allow(dead_code)]
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// Wraps `body` in a complete HTML document with a titled head
#[allow(dead_code)]
pub fn create_test_html(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Newsletter</title></head>
<body>
{body}
</body>
</html>"#
    )
}

/// Writes `bytes` to `dir/name` and returns the full path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write test file");
    path
}

/// Config whose temp files and relative image sources both live in `dir`
#[allow(dead_code)]
pub fn test_config(dir: &Path) -> MailConfig {
    MailConfig::builder()
        .default_from("newsletter@example.com", Some("Example Newsletter"))
        .temp_dir(dir)
        .base_dir(dir)
        .build()
        .expect("valid test config")
}

/// HTML message addressed to a single recipient
#[allow(dead_code)]
pub fn html_message(config: &MailConfig, body: &str) -> EmailMessage {
    let mut message = EmailMessage::new(config);
    message
        .add_to("reader@example.com", Some("Reader"))
        .set_subject("Weekly digest")
        .set_body(body)
        .as_html();
    message
}

/// Number of entries in `dir` whose file name starts with `prefix`
#[allow(dead_code)]
pub fn count_files_with_prefix(dir: &Path, prefix: &str) -> usize {
    std::fs::read_dir(dir)
        .expect("read test dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .count()
}
