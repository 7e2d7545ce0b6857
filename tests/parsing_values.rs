//! Integration tests for property value parsing.
//!
//! Goes through `parse_stylesheet` so values are exercised exactly as a
//! sheet author writes them: colors, dimensions, spacing shorthands,
//! borders, text styling, alignment pairs, and layout keywords.

use tuicss::parser::{Declaration, parse_stylesheet};
use tuicss::types::{
    AlignHorizontal, AlignVertical, BorderKind, Dock, Overflow, Rgba, Scalar, ScrollbarGutter,
    Spacing, TextAlign, TextStyle, Unit,
};

fn declarations(source: &str) -> Vec<Declaration> {
    let sheet = parse_stylesheet(source).unwrap();
    assert_eq!(sheet.rules.len(), 1, "expected one rule in {source:?}");
    sheet.rules[0].declarations.clone()
}

fn single(source: &str) -> Declaration {
    let mut decls = declarations(source);
    assert_eq!(decls.len(), 1, "expected one declaration in {source:?}");
    decls.remove(0)
}

// ============================================================================
// COLORS
// ============================================================================

#[test]
fn test_hex_color() {
    match single("Button { color: #0178d4; }") {
        Declaration::Color(expr) => {
            assert_eq!(expr.to_string(), "#0178d4");
        }
        other => panic!("unexpected declaration: {other:?}"),
    }
}

#[test]
fn test_named_color() {
    match single("Button { background: crimson; }") {
        Declaration::Background(expr) => {
            assert_eq!(expr.to_string(), Rgba::rgb(220, 20, 60).to_string());
        }
        other => panic!("unexpected declaration: {other:?}"),
    }
}

#[test]
fn test_rgb_function_color() {
    match single("Button { color: rgb(1, 120, 212); }") {
        Declaration::Color(expr) => assert_eq!(expr.to_string(), "#0178d4"),
        other => panic!("unexpected declaration: {other:?}"),
    }
}

#[test]
fn test_color_with_percent_alpha() {
    // `$x 50%` style alpha suffix also applies to literals.
    match single("Button { background: black 50%; }") {
        Declaration::Background(expr) => {
            assert!(expr.to_string().contains("50%"));
        }
        other => panic!("unexpected declaration: {other:?}"),
    }
}

// ============================================================================
// DIMENSIONS AND SPACING
// ============================================================================

#[test]
fn test_width_units() {
    assert_eq!(
        single("X { width: 42; }"),
        Declaration::Width(Scalar::cells(42.0))
    );
    assert_eq!(
        single("X { width: 50%; }"),
        Declaration::Width(Scalar::percent(50.0))
    );
    assert_eq!(
        single("X { width: 80vw; }"),
        Declaration::Width(Scalar {
            value: 80.0,
            unit: Unit::ViewWidth
        })
    );
    assert_eq!(
        single("X { height: 30vh; }"),
        Declaration::Height(Scalar {
            value: 30.0,
            unit: Unit::ViewHeight
        })
    );
    assert_eq!(single("X { width: auto; }"), Declaration::Width(Scalar::AUTO));
}

#[test]
fn test_margin_shorthands() {
    assert_eq!(
        single("X { margin: 1; }"),
        Declaration::Margin(Spacing::all(Scalar::cells(1.0)))
    );
    assert_eq!(
        single("X { margin: 1 2; }"),
        Declaration::Margin(Spacing::vertical_horizontal(
            Scalar::cells(1.0),
            Scalar::cells(2.0)
        ))
    );
    assert_eq!(
        single("X { padding: 1 2 3 4; }"),
        Declaration::Padding(Spacing {
            top: Scalar::cells(1.0),
            right: Scalar::cells(2.0),
            bottom: Scalar::cells(3.0),
            left: Scalar::cells(4.0),
        })
    );
}

#[test]
fn test_individual_edge_properties() {
    let decls = declarations("X { margin-top: 1; padding-left: 2; }");
    assert_eq!(decls[0], Declaration::MarginTop(Scalar::cells(1.0)));
    assert_eq!(decls[1], Declaration::PaddingLeft(Scalar::cells(2.0)));
}

// ============================================================================
// BORDERS
// ============================================================================

#[test]
fn test_border_kind_and_color() {
    match single("X { border: tall #ff0000; }") {
        Declaration::Border(edge) => {
            assert_eq!(edge.kind, BorderKind::Tall);
            assert_eq!(edge.color.unwrap().to_string(), "#ff0000");
        }
        other => panic!("unexpected declaration: {other:?}"),
    }
}

#[test]
fn test_border_color_first_order() {
    match single("X { border-top: red hkey; }") {
        Declaration::BorderTop(edge) => {
            assert_eq!(edge.kind, BorderKind::Hkey);
            assert!(edge.color.is_some());
        }
        other => panic!("unexpected declaration: {other:?}"),
    }
}

#[test]
fn test_border_none() {
    match single("X { border: none; }") {
        Declaration::Border(edge) => {
            assert_eq!(edge.kind, BorderKind::None);
            assert!(edge.color.is_none());
        }
        other => panic!("unexpected declaration: {other:?}"),
    }
}

// ============================================================================
// TEXT AND ALIGNMENT
// ============================================================================

#[test]
fn test_text_style_multiple_flags() {
    assert_eq!(
        single("X { text-style: bold italic underline; }"),
        Declaration::TextStyleDecl(TextStyle::BOLD | TextStyle::ITALIC | TextStyle::UNDERLINE)
    );
}

#[test]
fn test_text_style_none_clears() {
    assert_eq!(
        single("X { text-style: none; }"),
        Declaration::TextStyleDecl(TextStyle::empty())
    );
}

#[test]
fn test_text_align() {
    assert_eq!(
        single("X { text-align: center; }"),
        Declaration::TextAlign(TextAlign::Center)
    );
}

#[test]
fn test_align_pair() {
    assert_eq!(
        single("X { align: center middle; }"),
        Declaration::Align(AlignHorizontal::Center, AlignVertical::Middle)
    );
    assert_eq!(
        single("X { content-align: right top; }"),
        Declaration::ContentAlign(AlignHorizontal::Right, AlignVertical::Top)
    );
}

// ============================================================================
// LAYOUT KEYWORDS
// ============================================================================

#[test]
fn test_display_and_visibility() {
    assert_eq!(
        single("X { display: none; }"),
        Declaration::Display(tuicss::types::Display::None)
    );
    assert_eq!(
        single("X { visibility: hidden; }"),
        Declaration::Visibility(tuicss::types::Visibility::Hidden)
    );
}

#[test]
fn test_opacity_forms() {
    assert_eq!(single("X { opacity: 0.5; }"), Declaration::Opacity(0.5));
    assert_eq!(single("X { opacity: 40%; }"), Declaration::Opacity(0.4));
    // Out-of-range values clamp instead of erroring.
    assert_eq!(single("X { opacity: 250%; }"), Declaration::Opacity(1.0));
}

#[test]
fn test_overflow_shorthand_and_axes() {
    assert_eq!(
        single("X { overflow: hidden; }"),
        Declaration::Overflow(Overflow::Hidden, Overflow::Hidden)
    );
    assert_eq!(
        single("X { overflow: auto scroll; }"),
        Declaration::Overflow(Overflow::Auto, Overflow::Scroll)
    );
    assert_eq!(
        single("X { overflow-y: scroll; }"),
        Declaration::OverflowY(Overflow::Scroll)
    );
}

#[test]
fn test_dock_and_scrollbar_gutter() {
    assert_eq!(single("X { dock: top; }"), Declaration::Dock(Dock::Top));
    assert_eq!(
        single("X { scrollbar-gutter: stable; }"),
        Declaration::ScrollbarGutter(ScrollbarGutter::Stable)
    );
}

// ============================================================================
// TOLERATED INPUT
// ============================================================================

#[test]
fn test_unknown_property_is_preserved_but_inert() {
    match single("X { layers: base overlay; }") {
        Declaration::Unknown(name) => assert_eq!(name, "layers"),
        other => panic!("unexpected declaration: {other:?}"),
    }
}

#[test]
fn test_grid_properties_load_as_unknown() {
    // Grid layout is out of scope, but sheets using it must still load.
    let decls = declarations("X { grid-size: 2 4; grid-gutter: 1; border-title-align: center; }");
    let names: Vec<_> = decls
        .iter()
        .map(|d| match d {
            Declaration::Unknown(name) => name.as_str(),
            other => panic!("unexpected declaration: {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["grid-size", "grid-gutter", "border-title-align"]);
}

#[test]
fn test_important_is_accepted_and_ignored() {
    assert_eq!(
        single("X { width: 10 !important; }"),
        Declaration::Width(Scalar::cells(10.0))
    );
}

#[test]
fn test_comments_are_stripped() {
    let decls = declarations("/* header */ X { /* inline */ width: 10; }");
    assert_eq!(decls, vec![Declaration::Width(Scalar::cells(10.0))]);
}
