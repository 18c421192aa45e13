//! Utility modules.

/// Log sanitization utilities to prevent credential exposure.
pub mod log_sanitizer;

/// XML response decoding into a value tree.
pub mod xml_tree;
