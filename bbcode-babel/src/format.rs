//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! A format names itself, advertises the file extensions it owns, and lists the formats it
//! can be converted into.

use crate::error::FormatError;
use crate::options::ConvertOptions;

/// Trait for document formats
///
/// Conversions are text to text. A format that only ever appears as an output (BBCode)
/// leaves [`Format::conversion_targets`] empty and keeps the default [`Format::convert`].
///
/// # Examples
///
/// ```ignore
/// struct Shouty;
///
/// impl Format for Shouty {
///     fn name(&self) -> &str {
///         "shouty"
///     }
///
///     fn conversion_targets(&self) -> &[&str] {
///         &["plain"]
///     }
///
///     fn convert(
///         &self,
///         source: &str,
///         target: &str,
///         _options: &ConvertOptions,
///     ) -> Result<String, FormatError> {
///         self.ensure_target(target)?;
///         Ok(source.to_lowercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "bbcode")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Names of the formats this one converts into
    fn conversion_targets(&self) -> &[&str] {
        &[]
    }

    /// Whether this format can be converted into `target`
    fn supports_conversion_to(&self, target: &str) -> bool {
        self.conversion_targets().contains(&target)
    }

    /// Error unless `target` is one of [`Format::conversion_targets`]
    fn ensure_target(&self, target: &str) -> Result<(), FormatError> {
        if self.supports_conversion_to(target) {
            Ok(())
        } else {
            Err(FormatError::UnsupportedConversion {
                from: self.name().to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Convert source text in this format into `target`
    ///
    /// Default implementation returns UnsupportedConversion.
    fn convert(
        &self,
        _source: &str,
        target: &str,
        _options: &ConvertOptions,
    ) -> Result<String, FormatError> {
        Err(FormatError::UnsupportedConversion {
            from: self.name().to_string(),
            to: target.to_string(),
        })
    }
}
