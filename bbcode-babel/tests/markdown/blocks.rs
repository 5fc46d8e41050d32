//! Line-level blocks and the merge pass

use crate::common::md;
use bbcode_babel::{convert_with_options, ConvertOptions};
use insta::assert_snapshot;

#[test]
fn test_headings() {
    assert_eq!(md("# Title"), "[h1]Title[/h1]");
    assert_eq!(md("#### Sub"), "[h4]Sub[/h4]");
    assert_eq!(md("##   Spaced   "), "[h2]Spaced[/h2]");
}

#[test]
fn test_deep_and_unspaced_headings_stay_literal() {
    assert_eq!(md("##### five"), "##### five");
    assert_eq!(md("#hashtag"), "#hashtag");
}

#[test]
fn test_adjacent_list_items_merge() {
    assert_snapshot!(md("- one\n- two"), @r"
    [list]
    [*]one[/*]
    [*]two[/*]
    [/list]
    ");
}

#[test]
fn test_star_bullets_are_a_list() {
    assert_eq!(md("* one\n* two"), md("- one\n- two"));
}

#[test]
fn test_ordered_list() {
    assert_snapshot!(md("1. a\n2. b"), @r"
    [list=1]
    [*]a[/*]
    [*]b[/*]
    [/list]
    ");
}

#[test]
fn test_blank_line_splits_lists() {
    assert_eq!(
        md("- a\n\n- b"),
        "[list]\n[*]a[/*]\n[/list]\n\n[list]\n[*]b[/*]\n[/list]"
    );
}

#[test]
fn test_quote_lines_share_one_pair() {
    assert_eq!(md("> a\n> b"), "[quote]a\nb[/quote]");
}

#[test]
fn test_thematic_break() {
    assert_eq!(md("---"), "[hr]");
    assert_eq!(md("text\n---\nmore"), "text\n[hr]\nmore");
}

#[test]
fn test_indented_code() {
    assert_eq!(
        md("para\n\n    let x = 1;\n    x\n"),
        "para\n\n[code]let x = 1;\nx[/code]\n"
    );
}

#[test]
fn test_indented_code_disabled() {
    let options = ConvertOptions {
        indented_code: false,
        ..ConvertOptions::default()
    };
    let source = "para\n\n    let x = 1;\n";
    assert_eq!(convert_with_options(source, &options), source);
}

#[test]
fn test_fence_info_string_is_dropped() {
    assert_eq!(md("```rust\nlet a = 1;\n```"), "[code]let a = 1;[/code]");
}

#[test]
fn test_adjacent_fences_merge() {
    assert_eq!(md("```\na\n```\n```\nb\n```"), "[code]a\nb[/code]");
}

#[test]
fn test_crlf_round_trips() {
    assert_eq!(md("# T\r\n> q\r\n"), "[h1]T[/h1]\r\n[quote]q[/quote]\r\n");
}

#[test]
fn test_mixed_line_endings_are_kept_per_line() {
    assert_eq!(md("a\r\nb\nc"), "a\r\nb\nc");
    assert_eq!(md("> q\n> r\r\nplain"), "[quote]q\nr[/quote]\r\nplain");
}

#[test]
fn test_list_item_holding_a_heading() {
    assert_snapshot!(md("- # Title"), @r"
    [list]
    [*][h1]Title[/h1][/*]
    [/list]
    ");
}

#[test]
fn test_list_item_holding_a_quote_or_rule() {
    assert_eq!(md("1. > quoted"), "[list=1]\n[*][quote]quoted[/quote][/*]\n[/list]");
    assert_eq!(md("- ---"), "[list]\n[*][hr][/*]\n[/list]");
}

#[test]
fn test_translated_items_still_merge() {
    assert_snapshot!(md("- # A\n- plain\n- > c"), @r"
    [list]
    [*][h1]A[/h1][/*]
    [*]plain[/*]
    [*][quote]c[/quote][/*]
    [/list]
    ");
}
