//! Format implementations
//!
//! Markdown is the source side of every conversion; BBCode is the output side and
//! also owns the tag vocabulary the pipeline writes.

pub mod bbcode;
pub mod markdown;

pub use bbcode::BbcodeFormat;
pub use markdown::MarkdownFormat;
