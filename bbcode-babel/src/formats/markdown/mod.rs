//! Markdown format implementation
//!
//! Markdown is the only inbound format. Conversion runs the regex-and-scan pipeline in
//! [`crate::pipeline`] rather than a full CommonMark parser: the goal is a forum-ready
//! rendition of everyday Markdown, not CommonMark compliance.
//!
//! # Element Mapping Table
//!
//! | Markdown                    | BBCode                        | Notes                               |
//! |-----------------------------|-------------------------------|-------------------------------------|
//! | `# ..` to `#### ..`         | `[h1]..[/h1]` to `[h4]..[/h4]`| Deeper headings stay literal        |
//! | `**b**`, `__b__`            | `[b]b[/b]`                    |                                     |
//! | `*i*`, `_i_`                | `[i]i[/i]`                    | Intraword `_` ignored by default    |
//! | `~~s~~`                     | `[s]s[/s]`                    | Optional                            |
//! | `- a` / `* a` / `+ a`       | `[list]` `[*]a[/*]` `[/list]` | Adjacent items merge                |
//! | `1. a`                      | `[list=1]` ... `[/list]`      | Adjacent items merge                |
//! | `> q`                       | `[quote]q[/quote]`            | Adjacent lines merge                |
//! | ```` ``` ```` / `~~~` fence | `[code]..[/code]`             | Info string dropped                 |
//! | four-space / tab indent     | `[code]..[/code]`             | Optional                            |
//! | `` `c` ``                   | `[code]c[/code]`              |                                     |
//! | `![alt](url)`               | `[img]url[/img]`              | Alt text dropped                    |
//! | `[text](url "title")`       | `[url=url]text[/url]`         | Title dropped, text left verbatim   |
//! | `<https://..>`              | `[url]https://..[/url]`       |                                     |
//! | `---`                       | `[hr]`                        |                                     |
//!
//! # Lossy Conversions
//!
//! - Image alt text and link titles have no BBCode counterpart and are dropped
//! - Nested lists flatten; indentation of four spaces reads as code
//! - Anything not in the table passes through unchanged

use crate::error::FormatError;
use crate::format::Format;
use crate::options::ConvertOptions;
use crate::pipeline;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown (converts to BBCode)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn conversion_targets(&self) -> &[&str] {
        &["bbcode"]
    }

    fn convert(
        &self,
        source: &str,
        target: &str,
        options: &ConvertOptions,
    ) -> Result<String, FormatError> {
        self.ensure_target(target)?;
        Ok(pipeline::convert(source, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_bbcode() {
        let out = MarkdownFormat
            .convert("# Hi", "bbcode", &ConvertOptions::default())
            .unwrap();
        assert_eq!(out, "[h1]Hi[/h1]");
    }

    #[test]
    fn rejects_unknown_target() {
        let err = MarkdownFormat
            .convert("# Hi", "html", &ConvertOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::UnsupportedConversion {
                from: "markdown".to_string(),
                to: "html".to_string()
            }
        );
    }
}
