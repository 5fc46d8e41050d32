//! BBCode output vocabulary
//!
//! Every tag the pipeline emits is spelled here, so the rest of the crate never
//! builds tag strings by hand. The vocabulary is fixed and case-sensitive:
//!
//! | Construct        | Output                          |
//! |------------------|---------------------------------|
//! | Heading 1-4      | `[h1]..[/h1]` .. `[h4]..[/h4]`  |
//! | Bold             | `[b]..[/b]`                     |
//! | Italic           | `[i]..[/i]`                     |
//! | Strikethrough    | `[s]..[/s]`                     |
//! | Block quote      | `[quote]..[/quote]`             |
//! | Unordered list   | `[list]` + `[*]..[/*]` items    |
//! | Ordered list     | `[list=1]` + `[*]..[/*]` items  |
//! | Code             | `[code]..[/code]`               |
//! | Autolink         | `[url]URL[/url]`                |
//! | Link             | `[url=URL]text[/url]`           |
//! | Image            | `[img]URL[/img]`                |
//! | Thematic break   | `[hr]`                          |
//!
//! BBCode is output-only: the format can be selected as a conversion target
//! but nothing converts out of it.

use crate::format::Format;
use crate::pipeline::lines::BlockKind;
use crate::pipeline::text::LineEnding;

/// Format implementation for BBCode
pub struct BbcodeFormat;

impl Format for BbcodeFormat {
    fn name(&self) -> &str {
        "bbcode"
    }

    fn description(&self) -> &str {
        "Forum BBCode markup (output only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["bbcode", "bb"]
    }
}

/// Target-format descriptor for one block kind.
///
/// A block group renders as `wrapper_open`, then every line wrapped in
/// `item_open`/`item_close` and joined by newlines, then `wrapper_close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFormat {
    pub wrapper_open: &'static str,
    pub wrapper_close: &'static str,
    pub item_open: &'static str,
    pub item_close: &'static str,
}

impl BlockFormat {
    const fn wrapper(open: &'static str, close: &'static str) -> Self {
        BlockFormat {
            wrapper_open: open,
            wrapper_close: close,
            item_open: "",
            item_close: "",
        }
    }

    /// Render a group of line contents through this descriptor.
    pub fn render<'a, I>(&self, items: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.render_lines(items.into_iter().map(|item| (item, LineEnding::Lf)))
    }

    /// Render a group where each line keeps its own terminator.
    ///
    /// A newline inside `wrapper_open` takes the first line's ending; the one in
    /// `wrapper_close` takes the last line's.
    pub fn render_lines<'a, I>(&self, items: I) -> String
    where
        I: IntoIterator<Item = (&'a str, LineEnding)>,
    {
        let mut body = String::new();
        let mut first = None;
        let mut last = LineEnding::Lf;
        for (item, ending) in items {
            match first {
                Some(_) => body.push_str(last.as_str()),
                None => first = Some(ending),
            }
            last = ending;
            body.push_str(self.item_open);
            body.push_str(item);
            body.push_str(self.item_close);
        }
        let first = first.unwrap_or_default();
        format!(
            "{}{}{}",
            self.wrapper_open.replace('\n', first.as_str()),
            body,
            self.wrapper_close.replace('\n', last.as_str())
        )
    }
}

pub const UNORDERED_LIST: BlockFormat = BlockFormat {
    wrapper_open: "[list]\n",
    wrapper_close: "\n[/list]",
    item_open: "[*]",
    item_close: "[/*]",
};

pub const ORDERED_LIST: BlockFormat = BlockFormat {
    wrapper_open: "[list=1]\n",
    wrapper_close: "\n[/list]",
    item_open: "[*]",
    item_close: "[/*]",
};

pub const QUOTE: BlockFormat = BlockFormat::wrapper("[quote]", "[/quote]");
pub const CODE: BlockFormat = BlockFormat::wrapper("[code]", "[/code]");
pub const RULE: BlockFormat = BlockFormat::wrapper("[hr]", "");

const HEADINGS: [BlockFormat; 4] = [
    BlockFormat::wrapper("[h1]", "[/h1]"),
    BlockFormat::wrapper("[h2]", "[/h2]"),
    BlockFormat::wrapper("[h3]", "[/h3]"),
    BlockFormat::wrapper("[h4]", "[/h4]"),
];

/// Descriptor used to render a block of the given kind.
pub fn block_format(kind: BlockKind) -> BlockFormat {
    match kind {
        BlockKind::Heading(level) => {
            let idx = usize::from(level.clamp(1, 4)) - 1;
            HEADINGS[idx]
        }
        BlockKind::UnorderedItem => UNORDERED_LIST,
        BlockKind::OrderedItem => ORDERED_LIST,
        BlockKind::Quote => QUOTE,
        BlockKind::Code => CODE,
        BlockKind::Rule => RULE,
    }
}

pub const BOLD: (&str, &str) = ("[b]", "[/b]");
pub const ITALIC: (&str, &str) = ("[i]", "[/i]");
pub const STRIKE: (&str, &str) = ("[s]", "[/s]");

pub fn code(content: &str) -> String {
    format!("[code]{content}[/code]")
}

pub fn image(url: &str) -> String {
    format!("[img]{url}[/img]")
}

pub fn link(url: &str, text: &str) -> String {
    format!("[url={url}]{text}[/url]")
}

pub fn autolink(url: &str) -> String {
    format!("[url]{url}[/url]")
}
