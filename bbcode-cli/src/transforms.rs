//! CLI-specific transforms
//!
//! This module defines all the transform combinations available to `md2bbcode inspect`.
//! Each transform is a pipeline stage, optionally suffixed with `-json`
//! (e.g., "blocks", "regions-json").
//!
//! ## Transform Pipeline
//!
//! 1. **Regions** - Text → protected-region index
//!    - `regions`: offset table, one region per line
//!    - `regions-json`: JSON array of regions
//!
//! 2. **Emphasis** - Text with bold/italic/strikethrough tags written
//!    - `emphasis`: the rewritten text
//!    - `emphasis-json`: text plus the shifted region index
//!
//! 3. **Lines / Blocks** - Line records before and after block classification
//!    - `lines`, `blocks`: numbered table; tagged lines are starred
//!    - `lines-json`, `blocks-json`: JSON array of records
//!
//! 4. **BBCode** - The final document
//!    - `bbcode`: same output as `md2bbcode convert`
//!
//! Conversion options (`--extra-strikethrough false`, ...) apply to every stage.

use bbcode_babel::pipeline::{run_until, Stage};
use bbcode_babel::ConvertOptions;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "regions",
    "regions-json",
    "emphasis",
    "emphasis-json",
    "lines",
    "lines-json",
    "blocks",
    "blocks-json",
    "bbcode",
];

/// Transform used when `inspect` is given no explicit one
pub const DEFAULT_TRANSFORM: &str = "blocks";

/// Execute a named transform on Markdown source
///
/// # Returns
///
/// The transformed output as a string, or an error message
///
/// # Examples
///
/// ```ignore
/// let options = ConvertOptions::default();
/// let table = execute_transform("# Title", "blocks", &options)?;
/// let json = execute_transform("`code`", "regions-json", &options)?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    options: &ConvertOptions,
) -> Result<String, String> {
    let (stage_name, json) = match transform_name.strip_suffix("-json") {
        Some(stage) => (stage, true),
        None => (transform_name, false),
    };
    let stage = Stage::from_name(stage_name)
        .filter(|_| AVAILABLE_TRANSFORMS.contains(&transform_name))
        .ok_or_else(|| format!("Unknown transform: {transform_name}"))?;

    let output = run_until(source, options, stage);
    if json {
        serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization failed: {e}"))
    } else {
        Ok(output.to_string())
    }
}
