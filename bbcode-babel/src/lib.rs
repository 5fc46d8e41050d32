//! Markdown to BBCode conversion
//!
//!     This crate turns the everyday subset of Markdown that people type into chat boxes and
//!     README files into the BBCode dialect most forums accept. It is a pure lib: it powers
//!     md2bbcode but never reads files, env vars or prints anything itself.
//!
//! Architecture
//!
//!     Conversion is not a parse into a tree. It is a short sequence of text passes, each a pure
//!     function of the previous one, named by [`pipeline::Stage`]:
//!
//!     1. regions:  find spans that must never be touched by emphasis or block rules (code,
//!        links, images, autolinks) and index them by byte offset.
//!     2. emphasis: pair `**`, `__`, `*`, `_` and `~~` markers with a delimiter scan that
//!        consults the index, then shift the index past every inserted tag.
//!     3. lines:    render the protected regions and split into line records.
//!     4. blocks:   tag headings, list items, quotes and rules.
//!     5. bbcode:   merge neighbouring lines of the same block kind into one wrapper.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── options.rs              # ConvertOptions
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # Inbound, drives the pipeline
//!     │   └── bbcode              # Outbound, owns the tag vocabulary
//!     ├── pipeline
//!     │   ├── text.rs             # Byte-level scanning helpers
//!     │   ├── regions.rs
//!     │   ├── delimiters.rs
//!     │   ├── lines.rs
//!     │   └── merge.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <topic>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Formats
//!
//!     Markdown and BBCode are both registered as formats so the CLI can treat them uniformly, but
//!     only the markdown → bbcode direction exists. Asking for anything else is an
//!     [`FormatError::UnsupportedConversion`].
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod pipeline;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use options::ConvertOptions;
pub use pipeline::{Stage, StageOutput};
pub use registry::FormatRegistry;

/// Convert Markdown to BBCode with the default options.
///
/// Never fails: input that matches no rule passes through unchanged.
pub fn convert(source: &str) -> String {
    pipeline::convert(source, &ConvertOptions::default())
}

/// Convert Markdown to BBCode with explicit options.
pub fn convert_with_options(source: &str, options: &ConvertOptions) -> String {
    pipeline::convert(source, options)
}
