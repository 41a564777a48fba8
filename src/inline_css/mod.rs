//! CSS inlining for HTML email bodies
//!
//! This module turns a stylesheet into per-element `style` attributes where
//! that is possible, and keeps the remainder in a `<head>` style block.

// Sub-modules
pub mod inliner;
pub mod selector;
pub mod stylesheet;
pub mod types;

// Re-exports for public API
pub use inliner::{apply_stylesheet, inline};
pub use selector::{classify, SelectorPlacement};
pub use stylesheet::{parse, parse_with_mode};
pub use types::{InlineStyleTable, ParsedStylesheet, StyleRule};
