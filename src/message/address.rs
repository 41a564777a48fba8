//! Sender and recipient addresses
//!
//! Addresses are sanitized to the characters allowed in an email address and
//! validated before use. Invalid input yields `None` so the message setters
//! can simply ignore it.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(
        r"^[A-Za-z0-9!#$%&'*+=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$"
    )
    .expect("BUG: hardcoded email pattern is invalid");
}

/// A validated email address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mailbox {
    email: String,
    name: Option<String>,
}

impl Mailbox {
    /// Sanitize and validate `email`; `name` is escaped for header use
    ///
    /// # Example
    /// ```rust
    /// # use inline_mailer::message::Mailbox;
    /// let mailbox = Mailbox::parse("john@example.com", Some("John Doe")).unwrap();
    /// assert_eq!(mailbox.to_string(), "John Doe <john@example.com>");
    ///
    /// assert!(Mailbox::parse("John Doe", None).is_none());
    /// ```
    #[must_use]
    pub fn parse(email: &str, name: Option<&str>) -> Option<Self> {
        let email = sanitize_email(email);
        if email.is_empty() || !EMAIL.is_match(&email) {
            return None;
        }

        let name = name.map(sanitize_name).filter(|name| !name.is_empty());

        Some(Self { email, name })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => f.write_str(&self.email),
        }
    }
}

/// Remove every character that can not appear in an email address
fn sanitize_email(email: &str) -> String {
    email
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}

/// Drop control characters and escape HTML special characters
fn sanitize_name(name: &str) -> String {
    let printable: String = name.chars().filter(|c| !c.is_control()).collect();
    html_escape::encode_quoted_attribute(printable.trim()).into_owned()
}
