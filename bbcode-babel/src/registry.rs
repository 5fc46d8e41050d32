//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::options::ConvertOptions;
use std::collections::HashMap;

/// Registry of document formats
///
/// Provides a centralized registry for all available formats.
/// Formats can be registered and retrieved by name.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let out = registry.convert("**hi**", "markdown", "bbcode", &ConvertOptions::default())?;
/// assert_eq!(out, "[b]hi[/b]");
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Convert source text from one registered format to another
    ///
    /// Both names must be registered; the target check happens in the source format.
    pub fn convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &ConvertOptions,
    ) -> Result<String, FormatError> {
        let fmt = self.get(from)?;
        self.get(to)?;
        fmt.convert(source, to, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::bbcode::BbcodeFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test format
    struct TestFormat;
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test format"
        }
        fn conversion_targets(&self) -> &[&str] {
            &["bbcode"]
        }
        fn convert(
            &self,
            _source: &str,
            target: &str,
            _options: &ConvertOptions,
        ) -> Result<String, FormatError> {
            self.ensure_target(target)?;
            Ok("test output".to_string())
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let format = registry.get("test");
        assert!(format.is_ok());
        assert_eq!(format.unwrap().name(), "test");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        let result = registry.get("nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_convert() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(TestFormat);

        let result = registry.convert("input", "test", "bbcode", &ConvertOptions::default());
        assert_eq!(result.unwrap(), "test output");
    }

    #[test]
    fn test_registry_convert_source_not_found() {
        let registry = FormatRegistry::new();

        let result = registry.convert("input", "nonexistent", "bbcode", &ConvertOptions::default());
        match result.unwrap_err() {
            FormatError::FormatNotFound(name) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_convert_target_not_found() {
        let registry = FormatRegistry::with_defaults();

        let result = registry.convert("input", "markdown", "html", &ConvertOptions::default());
        match result.unwrap_err() {
            FormatError::FormatNotFound(name) => assert_eq!(name, "html"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_convert_wrong_direction() {
        let registry = FormatRegistry::with_defaults();

        let result = registry.convert("[b]x[/b]", "bbcode", "markdown", &ConvertOptions::default());
        assert_eq!(
            result.unwrap_err(),
            FormatError::UnsupportedConversion {
                from: "bbcode".to_string(),
                to: "markdown".to_string()
            }
        );
    }

    #[test]
    fn test_registry_convert_markdown() {
        let registry = FormatRegistry::default();
        let out = registry
            .convert("**hi**", "markdown", "bbcode", &ConvertOptions::default())
            .unwrap();
        assert_eq!(out, "[b]hi[/b]");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["bbcode", "markdown"]);
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(TestFormat); // Replace

        assert_eq!(registry.list_formats().len(), 1);
    }

    #[test]
    fn test_detect_format_from_filename() {
        let registry = FormatRegistry::with_defaults();

        assert_eq!(
            registry.detect_format_from_filename("post.md"),
            Some("markdown".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("/path/to/notes.markdown"),
            Some("markdown".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("post.bb"),
            Some("bbcode".to_string())
        );

        assert_eq!(registry.detect_format_from_filename("doc.unknown"), None);
        assert_eq!(registry.detect_format_from_filename("doc"), None);
    }
}
