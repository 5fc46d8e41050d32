//! Line records and the block-line translator
//!
//! After delimiter resolution the document is split into [`LineRecord`]s. Two
//! passes work on them:
//!
//! 1. [`split_lines`] renders the protected regions into BBCode and breaks the
//!    text into physical lines. Code-block lines come out already tagged, as do
//!    lines that begin inside a rendered multi-line region (a code span that
//!    wraps), so no block rule can touch them.
//! 2. [`translate`] classifies every untagged line on its own: headings 4..1,
//!    unordered item, ordered item, quote, thematic break. First match wins.
//!    The content of a list item is translated again with the heading, quote
//!    and rule rules, so `- # Title` is an item holding a heading. Lists do
//!    not nest.
//!
//! A `\r\n` terminator is split off into the record's [`LineEnding`] before any
//! rule sees the line, and the merge pass writes it back.
//!
//! The tag on a record is the sentinel. It lives beside the text, never inside
//! it, so input containing any character at all is safe.

use super::regions::{Protected, RegionIndex, RegionKind};
use super::text::{line_spans, split_ending, LineEnding};
use crate::formats::bbcode::block_format;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static HEADINGS: Lazy<[(u8, Regex); 4]> = Lazy::new(|| {
    [
        (4, Regex::new(r"^####\s+(.*?)\s*$").unwrap()),
        (3, Regex::new(r"^###\s+(.*?)\s*$").unwrap()),
        (2, Regex::new(r"^##\s+(.*?)\s*$").unwrap()),
        (1, Regex::new(r"^#\s+(.*?)\s*$").unwrap()),
    ]
});
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+*]\s+(.*)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());
static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s?(.*)$").unwrap());
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{3}\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading(u8),
    UnorderedItem,
    OrderedItem,
    Quote,
    Rule,
    Code,
}

impl BlockKind {
    /// Whether adjacent lines of this kind share one wrapper.
    pub fn is_mergeable(&self) -> bool {
        matches!(
            self,
            BlockKind::UnorderedItem | BlockKind::OrderedItem | BlockKind::Quote | BlockKind::Code
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading(1) => "h1",
            BlockKind::Heading(2) => "h2",
            BlockKind::Heading(3) => "h3",
            BlockKind::Heading(_) => "h4",
            BlockKind::UnorderedItem => "list-item",
            BlockKind::OrderedItem => "ordered-item",
            BlockKind::Quote => "quote",
            BlockKind::Rule => "rule",
            BlockKind::Code => "code",
        }
    }
}

/// Whether a line has been claimed, and by what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineTag {
    /// Plain text, still open to block rules
    Untagged,
    /// Continuation of a protected region; passes through untouched
    Verbatim,
    Block(BlockKind),
}

/// One physical line plus its sentinel.
///
/// For block lines `text` holds the inner content only (heading text, item
/// text, quote text, code line); the wrapper tags come from the block's
/// [`crate::formats::bbcode::BlockFormat`] when the merge pass renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub text: String,
    pub tag: LineTag,
    #[serde(skip_serializing_if = "LineEnding::is_lf")]
    pub ending: LineEnding,
}

impl LineRecord {
    pub fn untagged(text: impl Into<String>) -> Self {
        LineRecord {
            text: text.into(),
            tag: LineTag::Untagged,
            ending: LineEnding::Lf,
        }
    }

    pub fn block(kind: BlockKind, text: impl Into<String>) -> Self {
        LineRecord {
            text: text.into(),
            tag: LineTag::Block(kind),
            ending: LineEnding::Lf,
        }
    }

    pub fn verbatim(text: impl Into<String>) -> Self {
        LineRecord {
            text: text.into(),
            tag: LineTag::Verbatim,
            ending: LineEnding::Lf,
        }
    }

    pub fn with_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }

    pub fn is_tagged(&self) -> bool {
        self.tag != LineTag::Untagged
    }

    /// This line wrapped on its own, as it reads before block groups merge.
    pub fn render_single(&self) -> String {
        match self.tag {
            LineTag::Block(kind) => block_format(kind).render([self.text.as_str()]),
            LineTag::Untagged | LineTag::Verbatim => self.text.clone(),
        }
    }
}

/// Newtype for displaying a slice of records in `inspect` output.
pub struct RecordTable<'a>(pub &'a [LineRecord]);

impl fmt::Display for RecordTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, record) in self.0.iter().enumerate() {
            let label = match record.tag {
                LineTag::Untagged => "",
                LineTag::Verbatim => "verbatim",
                LineTag::Block(kind) => kind.name(),
            };
            let marker = if record.is_tagged() { '*' } else { ' ' };
            writeln!(
                f,
                "{:>4} {marker} {label:<12} | {}",
                idx + 1,
                record.render_single().replace('\n', "\\n")
            )?;
        }
        Ok(())
    }
}

/// Render protected regions and split the document into line records.
///
/// Code-block regions always cover whole lines, so they map onto a run of
/// lines that become tagged code records. Everything between them is rendered
/// inline and split on newlines.
pub fn split_lines(text: &str, regions: &RegionIndex) -> Vec<LineRecord> {
    let lines = line_spans(text);
    let mut records = Vec::with_capacity(lines.len());
    let mut chunk_first = 0;

    for region in regions.iter() {
        let Protected::CodeBlock { lines: code } = &region.protected else {
            continue;
        };
        let first = lines.partition_point(|&(start, _)| start < region.start);
        let last = lines.partition_point(|&(_, end)| end < region.end);
        debug_assert!(first < lines.len() && lines[first].0 == region.start);
        debug_assert!(last < lines.len() && lines[last].1 == region.end);

        push_chunk(text, &lines[chunk_first..first], regions, &mut records);
        if code.is_empty() {
            records.push(LineRecord::block(BlockKind::Code, ""));
        }
        records.extend(code.iter().map(|line| {
            let (line, ending) = split_ending(line, true);
            LineRecord::block(BlockKind::Code, line).with_ending(ending)
        }));
        // The group is followed by whatever ended the region's last line
        let (_, region_ending) = split_ending(&text[..region.end], region.end < text.len());
        if let Some(last_code) = records.last_mut() {
            last_code.ending = region_ending;
        }
        chunk_first = last + 1;
    }
    push_chunk(text, &lines[chunk_first.min(lines.len())..], regions, &mut records);

    // The unterminated last line takes the style of the line before it
    if let [.., previous, final_line] = records.as_mut_slice() {
        final_line.ending = previous.ending;
    }
    records
}

/// Render the inline regions inside a run of plain lines and push one record
/// per resulting line.
fn push_chunk(
    text: &str,
    chunk: &[(usize, usize)],
    regions: &RegionIndex,
    records: &mut Vec<LineRecord>,
) {
    let (Some(&(start, _)), Some(&(_, end))) = (chunk.first(), chunk.last()) else {
        return;
    };

    let mut rendered = String::with_capacity(end - start);
    let mut spans = Vec::new();
    let mut cursor = start;
    let inline = regions
        .iter()
        .filter(|r| r.kind() != RegionKind::CodeBlock && r.start >= start && r.end <= end);
    for region in inline {
        rendered.push_str(&text[cursor..region.start]);
        let span_start = rendered.len();
        rendered.push_str(&region.protected.render_inline());
        spans.push((span_start, rendered.len()));
        cursor = region.end;
    }
    rendered.push_str(&text[cursor..end]);

    let chunk_terminated = end < text.len();
    for (line_start, line_end) in line_spans(&rendered) {
        let inside_region = spans
            .iter()
            .any(|&(s, e)| s < line_start && line_start < e);
        let terminated = line_end < rendered.len() || chunk_terminated;
        let (line, ending) = split_ending(&rendered[line_start..line_end], terminated);
        let record = if inside_region {
            LineRecord::verbatim(line)
        } else {
            LineRecord::untagged(line)
        };
        records.push(record.with_ending(ending));
    }
}

/// Classify a single line. Returns the block kind and inner content.
///
/// List-item content that is itself a heading, quote or rule comes back
/// already rendered.
pub fn classify(line: &str) -> Option<(BlockKind, String)> {
    if let Some(heading) = classify_heading(line) {
        return Some(heading);
    }
    if let Some(caps) = UNORDERED_ITEM.captures(line) {
        return Some((BlockKind::UnorderedItem, item_content(&caps[1])));
    }
    if let Some(caps) = ORDERED_ITEM.captures(line) {
        return Some((BlockKind::OrderedItem, item_content(&caps[1])));
    }
    classify_quote_or_rule(line)
}

fn classify_heading(line: &str) -> Option<(BlockKind, String)> {
    HEADINGS.iter().find_map(|(level, pattern)| {
        pattern
            .captures(line)
            .map(|caps| (BlockKind::Heading(*level), caps[1].to_string()))
    })
}

fn classify_quote_or_rule(line: &str) -> Option<(BlockKind, String)> {
    if let Some(caps) = QUOTE.captures(line) {
        return Some((BlockKind::Quote, caps[1].to_string()));
    }
    if RULE.is_match(line) {
        return Some((BlockKind::Rule, String::new()));
    }
    None
}

/// Translate an item's content with every rule except the list rules.
fn item_content(content: &str) -> String {
    match classify_heading(content).or_else(|| classify_quote_or_rule(content)) {
        Some((kind, inner)) => block_format(kind).render([inner.as_str()]),
        None => content.to_string(),
    }
}

/// Tag every untagged line that matches a block rule. Tagged lines are kept as is.
pub fn translate(records: Vec<LineRecord>) -> Vec<LineRecord> {
    let mut tagged = 0;
    let translated: Vec<LineRecord> = records
        .into_iter()
        .map(|record| {
            if record.is_tagged() {
                return record;
            }
            match classify(&record.text) {
                Some((kind, content)) => {
                    tagged += 1;
                    LineRecord::block(kind, content).with_ending(record.ending)
                }
                None => record,
            }
        })
        .collect();
    tracing::debug!(lines = translated.len(), tagged, "translated block lines");
    translated
}
