//! Full-document conversion

use crate::common::{fixture, md};
use bbcode_babel::pipeline::{run_until, Stage, StageOutput};
use bbcode_babel::ConvertOptions;

#[test]
fn test_kitchensink() {
    let source = fixture("kitchensink.md");
    let expected = fixture("kitchensink.bbcode");
    assert_eq!(md(&source), expected);
}

#[test]
fn test_kitchensink_regions() {
    let source = fixture("kitchensink.md");
    let StageOutput::Regions(index) = run_until(&source, &ConvertOptions::default(), Stage::Regions)
    else {
        panic!("expected regions output");
    };
    let kinds: Vec<_> = index.iter().map(|r| r.kind().name()).collect();
    assert_eq!(
        kinds,
        vec!["code-span", "link", "code-span", "code-block", "image", "autolink"]
    );
}
