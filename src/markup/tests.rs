//! Tests for markup module

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_parse_all_kinds() {
    let parts = parse("***Hello+++**World+++*Bold+++-Item+++Plain text");

    assert_eq!(
        parts,
        vec![
            TextPart::new("Hello", PartKind::Title),
            TextPart::new("World", PartKind::Subtitle),
            TextPart::new("Bold", PartKind::Bold),
            TextPart::new("Item", PartKind::BulletPoint),
            TextPart::new("Plain text", PartKind::RegularText),
        ]
    );
}

#[test_case("***Title", PartKind::Title, "Title" ; "three stars")]
#[test_case("** Sub **", PartKind::Subtitle, "Sub" ; "two stars both sides")]
#[test_case("*Bold*", PartKind::Bold, "Bold" ; "one star both sides")]
#[test_case("- item", PartKind::BulletPoint, "item" ; "dash")]
#[test_case("just words", PartKind::RegularText, "just words" ; "unmarked")]
#[test_case("  padded  ", PartKind::RegularText, "padded" ; "trimmed plain")]
fn test_parse_single_block(input: &str, kind: PartKind, content: &str) {
    assert_eq!(parse(input), vec![TextPart::new(content, kind)]);
}

#[test]
fn test_bullet_strips_every_dash() {
    let parts = parse("- a-b-c");
    assert_eq!(parts, vec![TextPart::new("abc", PartKind::BulletPoint)]);
}

#[test]
fn test_title_strips_inner_markers() {
    // Every "***" goes, stray single stars stay
    let parts = parse("***Big***news*");
    assert_eq!(parts, vec![TextPart::new("Bignews*", PartKind::Title)]);
}

#[test]
fn test_four_stars_is_title() {
    let parts = parse("****x");
    assert_eq!(parts, vec![TextPart::new("*x", PartKind::Title)]);
}

#[test]
fn test_dash_inside_regular_text_is_kept() {
    let parts = parse("well-known fact");
    assert_eq!(
        parts,
        vec![TextPart::new("well-known fact", PartKind::RegularText)]
    );
}

#[test_case("" ; "empty")]
#[test_case("   \n\t " ; "whitespace")]
#[test_case("+++" ; "single delimiter")]
#[test_case(" +++ \n +++ +++" ; "delimiters and whitespace")]
fn test_parse_empty(input: &str) {
    assert!(parse(input).is_empty());
}

#[test]
fn test_marker_only_block_yields_empty_content() {
    // The block is non-empty before stripping, so it is kept
    let parts = parse("***+++text");
    assert_eq!(
        parts,
        vec![
            TextPart::new("", PartKind::Title),
            TextPart::new("text", PartKind::RegularText),
        ]
    );
}

#[test]
fn test_parse_preserves_order_and_newlines() {
    let body = "\n**Intro**\n+++\nFirst line\nsecond line\n+++\n- one\n+++\n- two\n";
    let parts = parse(body);

    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], TextPart::new("Intro", PartKind::Subtitle));
    assert_eq!(
        parts[1],
        TextPart::new("First line\nsecond line", PartKind::RegularText)
    );
    assert_eq!(parts[2].content, "one");
    assert_eq!(parts[3].content, "two");
}

#[test]
fn test_parse_is_not_round_trippable() {
    let parts = parse("***Title+++- item");
    let flattened: Vec<&str> = parts.iter().map(|p| p.content.as_str()).collect();
    let reparsed = parse(&flattened.join(BLOCK_DELIMITER));

    assert!(reparsed.iter().all(|p| p.kind == PartKind::RegularText));
}

#[test]
fn test_text_part_display() {
    assert_eq!(TextPart::new("T", PartKind::Title).to_string(), "# T");
    assert_eq!(
        TextPart::new("b", PartKind::BulletPoint).to_string(),
        "\u{2022} b"
    );
    assert_eq!(TextPart::new("p", PartKind::RegularText).to_string(), "p");
}
