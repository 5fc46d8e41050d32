//! Error types for format operations
//!
//! Markup problems are never errors: unmatched or ambiguous Markdown passes
//! through as literal text. These errors only cover the registry surface,
//! where a caller can ask for a format or a direction that does not exist.

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The source format cannot be converted into the requested target
    #[error("Cannot convert from '{from}' to '{to}'")]
    UnsupportedConversion { from: String, to: String },
    /// An option passed to a format was not understood
    #[error("Invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },
}
