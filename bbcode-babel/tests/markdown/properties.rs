//! Property-based checks over generated documents

use bbcode_babel::convert;
use proptest::prelude::*;

/// Lines of letter words with trailing punctuation; no Markdown syntax at all
fn prose_strategy() -> impl Strategy<Value = String> {
    let word = "[a-zA-Z]{1,12}[,.;:!?]?";
    let line = prop::collection::vec(word, 1..12).prop_map(|words| words.join(" "));
    prop::collection::vec(line, 1..8).prop_map(|lines| lines.join("\n"))
}

/// Prose lines where each terminator is independently `\n` or `\r\n`
fn mixed_ending_prose_strategy() -> impl Strategy<Value = String> {
    let word = "[a-zA-Z]{1,12}[,.;:!?]?";
    let line = prop::collection::vec(word, 1..12).prop_map(|words| words.join(" "));
    let ending = prop_oneof![Just("\n"), Just("\r\n")];
    prop::collection::vec((line, ending), 1..8).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(line, ending)| format!("{line}{ending}"))
            .collect()
    })
}

/// Dense mixes of every character the pipeline reacts to
fn markup_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[-*_~`#>!<>()\\[\\]\\\\ a-z0-9.:/\n\t]{0,160}",
        "\\PC{0,120}",
    ]
}

proptest! {
    #[test]
    fn plain_prose_is_unchanged(doc in prose_strategy()) {
        prop_assert_eq!(convert(&doc), doc);
    }

    #[test]
    fn mixed_ending_prose_is_unchanged(doc in mixed_ending_prose_strategy()) {
        prop_assert_eq!(convert(&doc), doc);
    }

    #[test]
    fn reconversion_never_panics(doc in markup_strategy()) {
        let once = convert(&doc);
        let _ = convert(&once);
    }

    #[test]
    fn output_is_never_empty_for_non_empty_input(doc in markup_strategy()) {
        prop_assume!(!doc.is_empty());
        prop_assert!(!convert(&doc).is_empty());
    }
}
