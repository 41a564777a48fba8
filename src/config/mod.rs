//! Configuration module for message preparation
//!
//! This module provides the `MailConfig` struct and its builder
//! with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::MailConfigBuilder;
pub use types::MailConfig;
