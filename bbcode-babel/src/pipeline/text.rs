//! Byte-offset helpers shared by the pipeline stages.
//!
//! Every marker the pipeline looks for is ASCII, so byte offsets produced by
//! scanning `as_bytes()` are always valid `str` boundaries.

use serde::Serialize;

/// How a physical line was terminated in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    pub fn is_lf(&self) -> bool {
        *self == LineEnding::Lf
    }
}

/// Split a `\r` left over from a `\r\n` terminator off the end of a line.
///
/// Only lines that were followed by `\n` (`terminated`) lose their `\r`; a lone
/// `\r` at the very end of the document is content.
pub fn split_ending(line: &str, terminated: bool) -> (&str, LineEnding) {
    match line.strip_suffix('\r') {
        Some(stripped) if terminated => (stripped, LineEnding::Crlf),
        _ => (line, LineEnding::Lf),
    }
}

/// Byte spans `(start, end)` of every physical line, excluding the `\n`.
///
/// A trailing newline yields a final empty line, so joining the lines back with
/// `\n` reproduces the input exactly.
pub fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (idx, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            spans.push((start, idx));
            start = idx + 1;
        }
    }
    spans.push((start, text.len()));
    spans
}

/// Whether the byte at `pos` is preceded by an odd run of backslashes.
pub fn is_escaped(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut idx = pos;
    while idx > 0 && bytes[idx - 1] == b'\\' {
        count += 1;
        idx -= 1;
    }
    count % 2 == 1
}

/// Whether the line starting right after the `\n` at `newline` is blank.
pub fn next_line_is_blank(text: &str, newline: usize) -> bool {
    text.as_bytes()[newline + 1..]
        .iter()
        .take_while(|&&b| b != b'\n')
        .all(|&b| b == b' ' || b == b'\t' || b == b'\r')
}

/// The character immediately before byte offset `pos`, if any.
pub fn char_before(text: &str, pos: usize) -> Option<char> {
    text[..pos].chars().next_back()
}

/// The character starting at byte offset `pos`, if any.
pub fn char_at(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().next()
}

/// Length of the run of `byte` starting at `pos`.
pub fn run_length(text: &str, pos: usize, byte: u8) -> usize {
    text.as_bytes()[pos..]
        .iter()
        .take_while(|&&b| b == byte)
        .count()
}
