//! Delimiter resolution for bold, italic and strikethrough
//!
//! Each marker class is resolved in its own left-to-right scan. An opener pairs
//! with the nearest following closer of the same marker; the pair is realized by
//! replacing both markers with the tag's open and close forms. Pairs with an
//! endpoint inside a protected region are discarded.
//!
//! Class order is fixed: the double-character bold markers run before their
//! single-character italic counterparts so that `**x**` is never read as two
//! adjacent italics.
//!
//! Flanking rules keep list bullets and spaced operators out of the picture:
//! an opener must be followed by a non-space character, a closer preceded by
//! one, and a single-character marker must not touch another copy of itself.

use super::regions::RegionIndex;
use super::text::{char_at, char_before, is_escaped, next_line_is_blank};
use crate::formats::bbcode;
use crate::options::ConvertOptions;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmphasisTag {
    Bold,
    Italic,
    Strike,
}

impl EmphasisTag {
    pub fn open(&self) -> &'static str {
        self.tags().0
    }

    pub fn close(&self) -> &'static str {
        self.tags().1
    }

    fn tags(&self) -> (&'static str, &'static str) {
        match self {
            EmphasisTag::Bold => bbcode::BOLD,
            EmphasisTag::Italic => bbcode::ITALIC,
            EmphasisTag::Strike => bbcode::STRIKE,
        }
    }
}

/// One emphasis-class marker and the tag it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerClass {
    pub marker: &'static str,
    pub tag: EmphasisTag,
    /// Whether a pair may span a blank (paragraph-breaking) line
    pub crosses_blank_lines: bool,
}

impl MarkerClass {
    const fn new(marker: &'static str, tag: EmphasisTag, crosses_blank_lines: bool) -> Self {
        MarkerClass {
            marker,
            tag,
            crosses_blank_lines,
        }
    }

    fn byte(&self) -> u8 {
        self.marker.as_bytes()[0]
    }

    fn is_single(&self) -> bool {
        self.marker.len() == 1
    }
}

pub const BOLD_STAR: MarkerClass = MarkerClass::new("**", EmphasisTag::Bold, false);
pub const BOLD_UNDERSCORE: MarkerClass = MarkerClass::new("__", EmphasisTag::Bold, false);
pub const ITALIC_STAR: MarkerClass = MarkerClass::new("*", EmphasisTag::Italic, false);
pub const ITALIC_UNDERSCORE: MarkerClass = MarkerClass::new("_", EmphasisTag::Italic, false);
pub const STRIKE_TILDE: MarkerClass = MarkerClass::new("~~", EmphasisTag::Strike, true);

/// Resolution order across marker classes.
pub const MARKER_ORDER: [MarkerClass; 5] = [
    BOLD_STAR,
    BOLD_UNDERSCORE,
    ITALIC_STAR,
    ITALIC_UNDERSCORE,
    STRIKE_TILDE,
];

/// Text after delimiter resolution, with the region index shifted to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub regions: RegionIndex,
    pub realized: usize,
}

/// Resolve every enabled marker class in [`MARKER_ORDER`].
pub fn resolve(text: &str, regions: RegionIndex, options: &ConvertOptions) -> Resolution {
    let mut resolution = Resolution {
        text: text.to_string(),
        regions,
        realized: 0,
    };
    for class in MARKER_ORDER {
        if class.tag == EmphasisTag::Strike && !options.strikethrough {
            continue;
        }
        let count = resolve_class(&mut resolution, class, options);
        tracing::debug!(marker = class.marker, pairs = count, "resolved delimiters");
        resolution.realized += count;
    }
    resolution
}

/// Resolve one marker class in place, returning the number of realized pairs.
pub fn resolve_class(
    resolution: &mut Resolution,
    class: MarkerClass,
    options: &ConvertOptions,
) -> usize {
    let len = class.marker.len();
    let (open_tag, close_tag) = (class.tag.open(), class.tag.close());
    let mut realized = 0;
    let mut pos = 0;

    while let Some(open) = find_opener(&resolution.text, pos, class, options) {
        if resolution.regions.contains(open) {
            pos = open + 1;
            continue;
        }
        let close = match find_closer(&resolution.text, open + len, class, options) {
            Ok(close) => close,
            // No later opener before the boundary can find a closer either
            Err(boundary) => {
                pos = boundary;
                continue;
            }
        };
        if resolution.regions.contains(close) {
            tracing::trace!(open, close, marker = class.marker, "pair touches protected region");
            // Every opener up to `close - len` would pick this same closer
            pos = close + 1 - len;
            continue;
        }
        debug_assert!(close + len <= resolution.text.len());

        // Closer first so the opener offset stays valid
        resolution.text.replace_range(close..close + len, close_tag);
        resolution.regions.shift(close, delta(close_tag, len));
        resolution.text.replace_range(open..open + len, open_tag);
        resolution.regions.shift(open, delta(open_tag, len));

        pos = close + open_tag.len() - len + close_tag.len();
        realized += 1;
    }
    realized
}

fn delta(tag: &str, marker_len: usize) -> isize {
    tag.len() as isize - marker_len as isize
}

fn find_opener(
    text: &str,
    from: usize,
    class: MarkerClass,
    options: &ConvertOptions,
) -> Option<usize> {
    let len = class.marker.len();
    (from..text.len())
        .filter(|&pos| text.as_bytes()[pos..].starts_with(class.marker.as_bytes()))
        .find(|&pos| {
            is_marker(text, pos, class)
                && char_at(text, pos + len).is_some_and(|c| !c.is_whitespace())
                && (class.byte() != b'_'
                    || options.intraword_underscore
                    || !char_before(text, pos).is_some_and(char::is_alphanumeric))
        })
}

/// Offset of the nearest closer at or after `from`.
///
/// Whether a marker closes does not depend on where its opener is, so on
/// failure the error carries the offset where the search stopped (the next
/// paragraph break, or the end of the text) and every opener before it is
/// already known to be unmatched.
fn find_closer(
    text: &str,
    from: usize,
    class: MarkerClass,
    options: &ConvertOptions,
) -> Result<usize, usize> {
    let bytes = text.as_bytes();
    let len = class.marker.len();
    for pos in from..bytes.len() {
        if bytes[pos] == b'\n' && !class.crosses_blank_lines && next_line_is_blank(text, pos) {
            return Err(pos);
        }
        if !bytes[pos..].starts_with(class.marker.as_bytes()) || !is_marker(text, pos, class) {
            continue;
        }
        let right_flanking = char_before(text, pos).is_some_and(|c| !c.is_whitespace());
        let word_follows = char_at(text, pos + len).is_some_and(char::is_alphanumeric);
        if right_flanking
            && (class.byte() != b'_' || options.intraword_underscore || !word_follows)
        {
            return Ok(pos);
        }
    }
    Err(bytes.len())
}

/// Unescaped, and for single-character markers, not part of a longer run.
fn is_marker(text: &str, pos: usize, class: MarkerClass) -> bool {
    if is_escaped(text, pos) {
        return false;
    }
    if class.is_single() {
        let bytes = text.as_bytes();
        let byte = class.byte();
        let before = pos > 0 && bytes[pos - 1] == byte;
        let after = bytes.get(pos + 1) == Some(&byte);
        return !before && !after;
    }
    true
}
