//! Integration tests for declaration serialization.
//!
//! `Declaration` implements `Display` so a parsed sheet can be written
//! back out for diagnostics; serialized declarations must reparse to the
//! same value.

use tuicss::parser::{Declaration, parse_stylesheet};

fn parse_single(source: &str) -> Declaration {
    let sheet = parse_stylesheet(source).unwrap();
    sheet.rules[0].declarations[0].clone()
}

fn reparses_same(property_and_value: &str) {
    let source = format!("X {{ {property_and_value} }}");
    let decl = parse_single(&source);

    let reparsed = parse_single(&format!("X {{ {decl} }}"));
    assert_eq!(decl, reparsed, "serialized form was {decl:?}");
}

#[test]
fn test_color_declarations_round_trip() {
    reparses_same("color: #0178d4;");
    reparses_same("background: #1e1e1e;");
    reparses_same("tint: #00ff00;");
}

#[test]
fn test_dimension_declarations_round_trip() {
    reparses_same("width: 42;");
    reparses_same("height: 50%;");
    reparses_same("min-width: 80vw;");
    reparses_same("max-height: auto;");
}

#[test]
fn test_spacing_declarations_round_trip() {
    reparses_same("margin: 1 2 3 4;");
    reparses_same("padding: 1 2;");
    reparses_same("margin-top: 3;");
}

#[test]
fn test_border_declarations_round_trip() {
    reparses_same("border: tall #ff0000;");
    reparses_same("border-left: none;");
}

#[test]
fn test_text_and_alignment_round_trip() {
    reparses_same("text-style: bold italic;");
    reparses_same("text-align: center;");
    reparses_same("align: center middle;");
}

#[test]
fn test_layout_declarations_round_trip() {
    reparses_same("display: none;");
    reparses_same("visibility: hidden;");
    reparses_same("opacity: 0.5;");
    reparses_same("overflow: auto scroll;");
    reparses_same("dock: top;");
    reparses_same("scrollbar-gutter: stable;");
}

#[test]
fn test_property_name_matches_source_spelling() {
    assert_eq!(parse_single("X { min-width: 1; }").property_name(), "min-width");
    assert_eq!(parse_single("X { text-style: bold; }").property_name(), "text-style");
    assert_eq!(
        parse_single("X { scrollbar-gutter: auto; }").property_name(),
        "scrollbar-gutter"
    );
}
