//! Shared configuration loader for md2bbcode.
//!
//! `defaults/bbcode.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`BbcodeConfig`].

use bbcode_babel::ConvertOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/bbcode.default.toml");

/// Top-level configuration consumed by md2bbcode.
#[derive(Debug, Clone, Deserialize)]
pub struct BbcodeConfig {
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub markdown: ConvertMarkdownConfig,
}

/// Mirrors [`ConvertOptions`] field for field.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertMarkdownConfig {
    pub strikethrough: bool,
    pub indented_code: bool,
    pub intraword_underscore: bool,
}

impl From<ConvertMarkdownConfig> for ConvertOptions {
    fn from(config: ConvertMarkdownConfig) -> Self {
        ConvertOptions::from(&config)
    }
}

impl From<&ConvertMarkdownConfig> for ConvertOptions {
    fn from(config: &ConvertMarkdownConfig) -> Self {
        ConvertOptions {
            strikethrough: config.strikethrough,
            indented_code: config.indented_code,
            intraword_underscore: config.intraword_underscore,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BbcodeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BbcodeConfig, ConfigError> {
    Loader::new().build()
}
