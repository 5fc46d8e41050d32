use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Knobs for the Markdown → BBCode conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Whether `~~text~~` becomes `[s]text[/s]`
    pub strikethrough: bool,

    /// Whether lines indented by four spaces or a tab are code blocks
    pub indented_code: bool,

    /// Whether `_` may open or close emphasis inside a word (`snake_case_name`)
    pub intraword_underscore: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            indented_code: true,
            intraword_underscore: false,
        }
    }
}

impl ConvertOptions {
    /// Keys accepted by [`ConvertOptions::apply_params`]
    pub const PARAM_KEYS: &'static [&'static str] =
        &["strikethrough", "indented-code", "intraword-underscore"];

    /// Apply string parameters (as passed through `--extra-<key> <value>`) on top of
    /// these options.
    ///
    /// Unknown keys and non-boolean values are rejected.
    pub fn apply_params(&mut self, params: &HashMap<String, String>) -> Result<(), FormatError> {
        for (key, raw) in params {
            let value = parse_bool(key, raw)?;
            match key.as_str() {
                "strikethrough" => self.strikethrough = value,
                "indented-code" | "indented_code" => self.indented_code = value,
                "intraword-underscore" | "intraword_underscore" => {
                    self.intraword_underscore = value
                }
                _ => {
                    return Err(FormatError::InvalidOption {
                        key: key.clone(),
                        reason: format!("expected one of {}", Self::PARAM_KEYS.join(", ")),
                    })
                }
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::InvalidOption {
            key: key.to_string(),
            reason: format!("'{other}' is not a boolean"),
        }),
    }
}
