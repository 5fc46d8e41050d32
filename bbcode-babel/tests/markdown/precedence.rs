//! Protected regions always win over emphasis and block rules

use crate::common::md;
use insta::assert_snapshot;

#[test]
fn test_link_url_and_text_are_never_rewritten() {
    assert_snapshot!(
        md("[*foo*](http://x.com/*y*)"),
        @"[url=http://x.com/*y*]*foo*[/url]"
    );
}

#[test]
fn test_code_span_is_never_rewritten() {
    assert_snapshot!(md("`a*b*c`"), @"[code]a*b*c[/code]");
}

#[test]
fn test_double_backtick_span_holds_single_backticks() {
    assert_eq!(md("``a ` b``"), "[code]a ` b[/code]");
}

#[test]
fn test_image_wins_over_link() {
    assert_eq!(md("![alt](pic.png)"), "[img]pic.png[/img]");
}

#[test]
fn test_fenced_code_ignores_every_other_rule() {
    assert_snapshot!(md("```\n**not bold**\n# not heading\n- not item\n```"), @r"
    [code]**not bold**
    # not heading
    - not item[/code]
    ");
}

#[test]
fn test_tilde_fence_protects_strikethrough_markers() {
    assert_eq!(md("~~~\n~~x~~\n~~~"), "[code]~~x~~[/code]");
}

#[test]
fn test_unclosed_fence_is_literal() {
    assert_eq!(md("```\ncode *x*"), "```\ncode [i]x[/i]");
}

#[test]
fn test_pair_with_closer_in_code_is_discarded() {
    assert_eq!(md("*a `b*` c"), "*a [code]b*[/code] c");
}

#[test]
fn test_escaped_link_is_literal() {
    assert_eq!(md(r"\[not](link)"), r"\[not](link)");
}

#[test]
fn test_code_span_across_lines_blocks_heading_rule() {
    assert_eq!(md("see `a\n# b` here"), "see [code]a\n# b[/code] here");
}
