//! Markdown → BBCode conversion tests
//!
//! Each file covers one family of constructs; `kitchensink` runs the full
//! fixture document through the pipeline.

mod blocks;
mod inline;
mod kitchensink;
mod precedence;
mod properties;
