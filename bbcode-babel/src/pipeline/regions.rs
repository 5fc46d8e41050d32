//! Protected-region index
//!
//! Finds the spans that later stages must not rewrite: code blocks, code spans,
//! images, links and autolinks. Detection order is fixed and doubles as
//! precedence: a candidate that overlaps a span claimed by an earlier rule is
//! rejected, which is how `![alt](src)` wins over the `[alt](src)` link pattern
//! that starts one character later.
//!
//! Offsets are byte offsets into the document the index was built for. When a
//! later stage edits text outside the regions it must [`RegionIndex::shift`] the
//! index by the edit delta instead of reusing stale offsets.

use super::text::{is_escaped, line_spans, next_line_is_blank, run_length};
use crate::formats::bbcode;
use crate::options::ConvertOptions;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})([^`]*)$").unwrap());
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());
static AUTOLINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(https?:[^\s<>]+)>").unwrap());

/// What a protected span contains, with the pieces needed to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Protected {
    /// Fenced or indented code; one entry per content line
    CodeBlock { lines: Vec<String> },
    CodeSpan { code: String },
    Image { url: String },
    Link { text: String, url: String },
    Autolink { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionKind {
    CodeBlock,
    CodeSpan,
    Image,
    Link,
    Autolink,
}

impl RegionKind {
    pub fn name(&self) -> &'static str {
        match self {
            RegionKind::CodeBlock => "code-block",
            RegionKind::CodeSpan => "code-span",
            RegionKind::Image => "image",
            RegionKind::Link => "link",
            RegionKind::Autolink => "autolink",
        }
    }
}

impl Protected {
    pub fn kind(&self) -> RegionKind {
        match self {
            Protected::CodeBlock { .. } => RegionKind::CodeBlock,
            Protected::CodeSpan { .. } => RegionKind::CodeSpan,
            Protected::Image { .. } => RegionKind::Image,
            Protected::Link { .. } => RegionKind::Link,
            Protected::Autolink { .. } => RegionKind::Autolink,
        }
    }

    /// Inline BBCode for this span. Code blocks are rendered per line by the
    /// merge pass, so here they only fall back to a single `[code]` pair.
    pub fn render_inline(&self) -> String {
        match self {
            Protected::CodeBlock { lines } => bbcode::code(&lines.join("\n")),
            Protected::CodeSpan { code } => bbcode::code(code),
            Protected::Image { url } => bbcode::image(url),
            Protected::Link { text, url } => bbcode::link(url, text),
            Protected::Autolink { url } => bbcode::autolink(url),
        }
    }
}

/// A half-open byte interval `[start, end)` that later stages must leave alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
    #[serde(flatten)]
    pub protected: Protected,
}

impl Region {
    pub fn kind(&self) -> RegionKind {
        self.protected.kind()
    }
}

/// Sorted, non-overlapping set of protected regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Whether `offset` falls inside any region.
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.regions.partition_point(|r| r.end <= offset);
        self.regions
            .get(idx)
            .is_some_and(|r| r.start <= offset)
    }

    /// Whether `[start, end)` intersects any region.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        let idx = self.regions.partition_point(|r| r.end <= start);
        self.regions.get(idx).is_some_and(|r| r.start < end)
    }

    /// Insert a region, keeping the index sorted. Returns `false` (and leaves the
    /// index unchanged) when the region would overlap an existing one.
    pub fn insert(&mut self, region: Region) -> bool {
        if self.overlaps(region.start, region.end) {
            return false;
        }
        let idx = self.regions.partition_point(|r| r.start < region.start);
        self.regions.insert(idx, region);
        true
    }

    /// Move every region starting at or after `at` by `delta` bytes.
    pub fn shift(&mut self, at: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        let idx = self.regions.partition_point(|r| r.start < at);
        for region in &mut self.regions[idx..] {
            region.start = region.start.saturating_add_signed(delta);
            region.end = region.end.saturating_add_signed(delta);
        }
    }
}

impl fmt::Display for RegionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in &self.regions {
            writeln!(
                f,
                "{:>6}..{:<6} {:<10} {}",
                region.start,
                region.end,
                region.kind().name(),
                region.protected.render_inline().replace('\n', "\\n")
            )?;
        }
        Ok(())
    }
}

/// Build the protected-region index for `text`.
pub fn locate(text: &str, options: &ConvertOptions) -> RegionIndex {
    let mut index = RegionIndex::new();

    claim_fenced_code(text, &mut index);
    if options.indented_code {
        claim_indented_code(text, &mut index);
    }
    claim_code_spans(text, &mut index);
    claim_pattern(text, &IMAGE, &mut index, |caps| Protected::Image {
        url: link_destination(&caps[2]),
    });
    claim_pattern(text, &LINK, &mut index, |caps| Protected::Link {
        text: caps[1].to_string(),
        url: link_destination(&caps[2]),
    });
    claim_pattern(text, &AUTOLINK, &mut index, |caps| Protected::Autolink {
        url: caps[1].to_string(),
    });

    tracing::debug!(regions = index.len(), "located protected regions");
    index
}

fn claim_fenced_code(text: &str, index: &mut RegionIndex) {
    let lines = line_spans(text);
    let mut idx = 0;
    while idx < lines.len() {
        let (start, end) = lines[idx];
        let Some(caps) = FENCE_OPEN.captures(&text[start..end]) else {
            idx += 1;
            continue;
        };
        let fence = &caps[1];
        let fence_byte = fence.as_bytes()[0];
        let fence_len = fence.len();

        let closing = (idx + 1..lines.len()).find(|&candidate| {
            let (s, e) = lines[candidate];
            is_closing_fence(&text[s..e], fence_byte, fence_len)
        });

        match closing {
            Some(close_idx) => {
                let content = lines[idx + 1..close_idx]
                    .iter()
                    .map(|&(s, e)| text[s..e].to_string())
                    .collect();
                index.insert(Region {
                    start,
                    end: lines[close_idx].1,
                    protected: Protected::CodeBlock { lines: content },
                });
                idx = close_idx + 1;
            }
            // An unclosed fence stays literal text
            None => idx += 1,
        }
    }
}

fn is_closing_fence(line: &str, fence_byte: u8, min_len: usize) -> bool {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return false;
    }
    let run = run_length(line, indent, fence_byte);
    run >= min_len && line[indent + run..].trim().is_empty()
}

fn claim_indented_code(text: &str, index: &mut RegionIndex) {
    let lines = line_spans(text);
    let mut idx = 0;
    while idx < lines.len() {
        let first = idx;
        let mut content = Vec::new();
        while idx < lines.len() {
            let (s, e) = lines[idx];
            match strip_code_indent(&text[s..e]) {
                Some(code) if !index.overlaps(s, e) => {
                    content.push(code.to_string());
                    idx += 1;
                }
                _ => break,
            }
        }
        if content.is_empty() {
            idx += 1;
            continue;
        }
        index.insert(Region {
            start: lines[first].0,
            end: lines[idx - 1].1,
            protected: Protected::CodeBlock { lines: content },
        });
    }
}

fn strip_code_indent(line: &str) -> Option<&str> {
    let code = line
        .strip_prefix("    ")
        .or_else(|| line.strip_prefix('\t'))?;
    if code.trim().is_empty() {
        None
    } else {
        Some(code)
    }
}

fn claim_code_spans(text: &str, index: &mut RegionIndex) {
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] != b'`' {
            pos += 1;
            continue;
        }
        let run = run_length(text, pos, b'`');
        if is_escaped(text, pos) || index.contains(pos) {
            pos += run;
            continue;
        }
        match find_closing_backticks(text, pos + run, run) {
            Some(close) if !index.overlaps(pos, close + run) => {
                index.insert(Region {
                    start: pos,
                    end: close + run,
                    protected: Protected::CodeSpan {
                        code: text[pos + run..close].to_string(),
                    },
                });
                pos = close + run;
            }
            _ => pos += run,
        }
    }
}

/// Start of the next run of exactly `len` backticks, stopping at a blank line.
fn find_closing_backticks(text: &str, from: usize, len: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        match bytes[pos] {
            b'`' => {
                let run = run_length(text, pos, b'`');
                if run == len {
                    return Some(pos);
                }
                pos += run;
            }
            b'\n' if next_line_is_blank(text, pos) => return None,
            _ => pos += 1,
        }
    }
    None
}

fn claim_pattern<F>(text: &str, pattern: &Regex, index: &mut RegionIndex, build: F)
where
    F: Fn(&Captures<'_>) -> Protected,
{
    let mut pos = 0;
    while let Some(caps) = pattern.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        let claimed = !is_escaped(text, whole.start())
            && index.insert(Region {
                start: whole.start(),
                end: whole.end(),
                protected: build(&caps),
            });
        pos = if claimed {
            whole.end()
        } else {
            whole.start() + 1
        };
    }
}

/// URL part of `(destination "optional title")`.
fn link_destination(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix('<') {
        if let Some(end) = inner.find('>') {
            return inner[..end].to_string();
        }
    }
    raw.split_whitespace().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<RegionKind> {
        locate(text, &ConvertOptions::default())
            .iter()
            .map(Region::kind)
            .collect()
    }

    #[test]
    fn empty_text_has_no_regions() {
        assert!(locate("plain prose", &ConvertOptions::default()).is_empty());
    }

    #[test]
    fn image_wins_over_link() {
        let index = locate("see ![alt](pic.png) here", &ConvertOptions::default());
        let regions: Vec<_> = index.iter().collect();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start, 4);
        assert_eq!(
            regions[0].protected,
            Protected::Image {
                url: "pic.png".to_string()
            }
        );
    }

    #[test]
    fn link_inside_code_span_is_not_claimed() {
        assert_eq!(kinds("`[a](b)` and [c](d)"), vec![
            RegionKind::CodeSpan,
            RegionKind::Link
        ]);
    }

    #[test]
    fn fenced_block_is_a_single_region() {
        let text = "before\n```rust\nlet x = 1;\n# not a heading\n```\nafter";
        let index = locate(text, &ConvertOptions::default());
        let region = index.iter().next().unwrap();
        assert_eq!(region.start, 7);
        assert_eq!(&text[region.end..], "\nafter");
        assert_eq!(
            region.protected,
            Protected::CodeBlock {
                lines: vec!["let x = 1;".to_string(), "# not a heading".to_string()]
            }
        );
    }

    #[test]
    fn unclosed_fence_is_literal() {
        assert!(kinds("```\nno closing fence").is_empty());
    }

    #[test]
    fn tilde_fence_needs_matching_character() {
        assert_eq!(kinds("~~~\ncode\n```\n~~~~"), vec![RegionKind::CodeBlock]);
    }

    #[test]
    fn indented_run_is_one_region() {
        let text = "para\n    one\n\ttwo\nback";
        let index = locate(text, &ConvertOptions::default());
        assert_eq!(index.len(), 1);
        let region = index.iter().next().unwrap();
        assert_eq!(
            region.protected,
            Protected::CodeBlock {
                lines: vec!["one".to_string(), "two".to_string()]
            }
        );
    }

    #[test]
    fn indented_code_can_be_disabled() {
        let options = ConvertOptions {
            indented_code: false,
            ..ConvertOptions::default()
        };
        assert!(locate("    not code", &options).is_empty());
    }

    #[test]
    fn code_span_needs_matching_run_length() {
        let index = locate("``a ` b`` c", &ConvertOptions::default());
        let region = index.iter().next().unwrap();
        assert_eq!(
            region.protected,
            Protected::CodeSpan {
                code: "a ` b".to_string()
            }
        );
    }

    #[test]
    fn code_span_does_not_cross_blank_line() {
        assert!(kinds("`open\n\nclose`").is_empty());
    }

    #[test]
    fn link_title_is_dropped() {
        let index = locate(r#"[home](http://x.com "Home page")"#, &ConvertOptions::default());
        assert_eq!(
            index.iter().next().unwrap().protected,
            Protected::Link {
                text: "home".to_string(),
                url: "http://x.com".to_string()
            }
        );
    }

    #[test]
    fn autolink_requires_scheme() {
        assert_eq!(kinds("<https://x.com> <b>"), vec![RegionKind::Autolink]);
    }

    #[test]
    fn escaped_link_is_literal() {
        assert!(kinds(r"\[a](b)").is_empty());
    }

    #[test]
    fn contains_and_overlaps_use_half_open_bounds() {
        let index = locate("ab `cd` ef", &ConvertOptions::default());
        assert!(!index.contains(2));
        assert!(index.contains(3));
        assert!(index.contains(6));
        assert!(!index.contains(7));
        assert!(index.overlaps(0, 4));
        assert!(!index.overlaps(7, 10));
    }

    #[test]
    fn shift_moves_regions_after_edit_point() {
        let mut index = locate("a `b` c `d`", &ConvertOptions::default());
        index.shift(6, 3);
        let starts: Vec<_> = index.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![2, 11]);
    }
}
