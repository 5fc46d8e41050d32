//! Emphasis, strikethrough and inline protected spans

use crate::common::md;
use bbcode_babel::{convert_with_options, ConvertOptions};
use insta::assert_snapshot;

#[test]
fn test_bold_and_italic() {
    assert_snapshot!(md("**bold** and *italic*"), @"[b]bold[/b] and [i]italic[/i]");
}

#[test]
fn test_underscore_variants() {
    assert_snapshot!(md("__bold__ and _italic_"), @"[b]bold[/b] and [i]italic[/i]");
}

#[test]
fn test_strikethrough_closes_with_s() {
    assert_snapshot!(md("~~old~~ new"), @"[s]old[/s] new");
}

#[test]
fn test_strikethrough_disabled() {
    let options = ConvertOptions {
        strikethrough: false,
        ..ConvertOptions::default()
    };
    assert_eq!(convert_with_options("~~old~~", &options), "~~old~~");
}

#[test]
fn test_emphasis_inside_heading() {
    assert_snapshot!(md("# *Hi*"), @"[h1][i]Hi[/i][/h1]");
}

#[test]
fn test_emphasis_inside_list_item() {
    assert_snapshot!(md("- **a**"), @r"
    [list]
    [*][b]a[/b][/*]
    [/list]
    ");
}

#[test]
fn test_bold_wrapping_a_link() {
    assert_snapshot!(md("**[link](u)**"), @"[b][url=u]link[/url][/b]");
}

#[test]
fn test_emphasis_spans_lines_within_a_paragraph() {
    assert_eq!(md("**one\ntwo**"), "[b]one\ntwo[/b]");
    assert_eq!(md("**one\n\ntwo**"), "**one\n\ntwo**");
}

#[test]
fn test_unmatched_markers_stay_literal() {
    assert_eq!(md("a * b"), "a * b");
    assert_eq!(md("**open only"), "**open only");
    assert_eq!(md("2 * 3 * 4"), "2 * 3 * 4");
}

#[test]
fn test_escaped_markers_stay_literal() {
    assert_eq!(md(r"\*star\*"), r"\*star\*");
}

#[test]
fn test_snake_case_is_untouched() {
    assert_eq!(md("call snake_case_name now"), "call snake_case_name now");
}

#[test]
fn test_intraword_underscore_option() {
    let options = ConvertOptions {
        intraword_underscore: true,
        ..ConvertOptions::default()
    };
    assert_eq!(
        convert_with_options("snake_case_name", &options),
        "snake[i]case[/i]name"
    );
}

#[test]
fn test_image_link_and_autolink() {
    assert_snapshot!(
        md("![alt](a.png) [t](http://a.b \"T\") <https://h.io>"),
        @"[img]a.png[/img] [url=http://a.b]t[/url] [url]https://h.io[/url]"
    );
}

#[test]
fn test_angle_bracket_destination() {
    assert_eq!(md("[t](<http://a.b/x y>)"), "[url=http://a.b/x y]t[/url]");
}

#[test]
fn test_only_http_autolinks() {
    assert_eq!(md("<ftp://files>"), "<ftp://files>");
    assert_eq!(md("<http://x>"), "[url]http://x[/url]");
}

#[test]
fn test_bbcode_input_passes_through() {
    let bbcode = "[b]bold[/b] [url=u]t[/url] [img]a.png[/img]";
    assert_eq!(md(bbcode), bbcode);
}
