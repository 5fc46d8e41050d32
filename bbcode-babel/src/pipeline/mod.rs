//! The conversion pipeline
//!
//! Markdown becomes BBCode through a fixed sequence of stages. Each stage is a
//! pure function of the previous stage's output; nothing is cached between
//! calls and nothing is shared between concurrent conversions.
//!
//! | Stage      | Input → Output                  | Module         |
//! |------------|---------------------------------|----------------|
//! | `regions`  | text → protected-region index   | [`regions`]    |
//! | `emphasis` | text + index → text + index     | [`delimiters`] |
//! | `lines`    | text + index → line records     | [`lines`]      |
//! | `blocks`   | line records → tagged records   | [`lines`]      |
//! | `bbcode`   | tagged records → text           | [`merge`]      |
//!
//! The order is load-bearing. Emphasis must consult the index before any tag
//! is written, block classification must see resolved inline tags, and the
//! merge pass only understands the records the block pass produced. The
//! [`Stage`] enum is the single place that order is written down.

pub mod delimiters;
pub mod lines;
pub mod merge;
pub mod regions;
pub mod text;

use crate::options::ConvertOptions;
use lines::{LineRecord, RecordTable};
use regions::RegionIndex;
use serde::Serialize;
use std::fmt;

/// Named pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Regions,
    Emphasis,
    Lines,
    Blocks,
    Bbcode,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Regions,
        Stage::Emphasis,
        Stage::Lines,
        Stage::Blocks,
        Stage::Bbcode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Regions => "regions",
            Stage::Emphasis => "emphasis",
            Stage::Lines => "lines",
            Stage::Blocks => "blocks",
            Stage::Bbcode => "bbcode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Regions => "Protected regions (code, links, images, autolinks)",
            Stage::Emphasis => "Text after bold/italic/strikethrough resolution",
            Stage::Lines => "Line records with protected regions rendered",
            Stage::Blocks => "Line records after block classification",
            Stage::Bbcode => "Final BBCode after block merging",
        }
    }

    pub fn from_name(name: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|stage| stage.name() == name)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the pipeline produced when stopped after a given stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "output", rename_all = "kebab-case")]
pub enum StageOutput {
    Regions(RegionIndex),
    Emphasis { text: String, regions: RegionIndex },
    Lines(Vec<LineRecord>),
    Blocks(Vec<LineRecord>),
    Bbcode(String),
}

impl fmt::Display for StageOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOutput::Regions(index) => write!(f, "{index}"),
            StageOutput::Emphasis { text, .. } => f.write_str(text),
            StageOutput::Lines(records) | StageOutput::Blocks(records) => {
                write!(f, "{}", RecordTable(records))
            }
            StageOutput::Bbcode(text) => f.write_str(text),
        }
    }
}

/// Run the pipeline up to and including `stage`.
///
/// Line endings are tracked per line: a `\r\n` line and a `\n` line in the same
/// document each come out with the terminator they went in with.
pub fn run_until(source: &str, options: &ConvertOptions, stage: Stage) -> StageOutput {
    let index = regions::locate(source, options);
    if stage == Stage::Regions {
        return StageOutput::Regions(index);
    }

    let resolution = delimiters::resolve(source, index, options);
    if stage == Stage::Emphasis {
        return StageOutput::Emphasis {
            text: resolution.text,
            regions: resolution.regions,
        };
    }

    let records = lines::split_lines(&resolution.text, &resolution.regions);
    if stage == Stage::Lines {
        return StageOutput::Lines(records);
    }

    let records = lines::translate(records);
    if stage == Stage::Blocks {
        return StageOutput::Blocks(records);
    }

    StageOutput::Bbcode(merge::merge_blocks(&records))
}

/// Run every stage and return the BBCode document.
pub fn convert(source: &str, options: &ConvertOptions) -> String {
    let span = tracing::debug_span!("convert", bytes = source.len());
    let _guard = span.enter();

    match run_until(source, options, Stage::Bbcode) {
        StageOutput::Bbcode(text) => text,
        other => unreachable!("pipeline stopped early at {other:?}"),
    }
}
