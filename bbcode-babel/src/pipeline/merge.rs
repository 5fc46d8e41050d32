//! Block merge pass
//!
//! Fuses runs of adjacent same-kind block lines into one wrapper. Two list
//! lines become one `[list]` with two `[*]` items rather than two one-item
//! lists; consecutive quote and code lines share a single pair of tags.
//!
//! Only immediate neighbours merge. A blank line, an untagged line or a line of
//! a different kind ends the group. Headings and rules never merge.

use super::lines::{BlockKind, LineRecord, LineTag};
use crate::formats::bbcode::block_format;

/// Collapse block groups and produce the final document text.
///
/// Every output line break is the terminator the corresponding source line
/// had, so LF and CRLF lines keep their own endings.
pub fn merge_blocks(records: &[LineRecord]) -> String {
    let mut out = String::new();
    let mut groups = 0;
    let mut idx = 0;

    while idx < records.len() {
        let record = &records[idx];
        let len = match record.tag {
            LineTag::Block(kind) if kind.is_mergeable() => {
                let len = group_len(&records[idx..], kind);
                let items = records[idx..idx + len]
                    .iter()
                    .map(|r| (r.text.as_str(), r.ending));
                out.push_str(&block_format(kind).render_lines(items));
                if len > 1 {
                    groups += 1;
                }
                len
            }
            LineTag::Block(kind) => {
                let item = (record.text.as_str(), record.ending);
                out.push_str(&block_format(kind).render_lines([item]));
                1
            }
            LineTag::Untagged | LineTag::Verbatim => {
                out.push_str(&record.text);
                1
            }
        };
        idx += len;
        if idx < records.len() {
            out.push_str(records[idx - 1].ending.as_str());
        }
    }

    tracing::debug!(groups, "merged block groups");
    out
}

/// Length of the run of `kind` lines at the start of `records`.
fn group_len(records: &[LineRecord], kind: BlockKind) -> usize {
    records
        .iter()
        .take_while(|r| r.tag == LineTag::Block(kind))
        .count()
}
