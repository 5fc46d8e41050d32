//! Shared helpers for the integration tests

use std::path::PathBuf;

/// Read a file from `tests/fixtures`
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Convert with every option at its default
pub fn md(source: &str) -> String {
    bbcode_babel::convert(source)
}
