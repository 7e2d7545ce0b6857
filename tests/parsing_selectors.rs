//! Integration tests for selector parsing.
//!
//! Covers the selector grammar:
//! - Type selectors: `Button`, `DataTable`
//! - Class selectors: `.primary`, `.datatable--cursor`
//! - ID selectors: `#sidebar`, `#main`
//! - Universal selector: `*`
//! - Pseudo-classes: `:hover`, `:focus`, `:blur`, `:focus-within`
//! - Combinators: descendant (space), child (`>`)
//! - Selector lists: `Button, .primary`

use tuicss::parser::{
    Combinator, PseudoClass, Selector, Specificity, parse_selector_list, parse_stylesheet,
};

// ============================================================================
// SIMPLE SELECTORS
// ============================================================================

#[test]
fn test_type_selector() {
    let (rest, list) = parse_selector_list("Button").unwrap();
    assert!(rest.is_empty());

    assert_eq!(list.selectors.len(), 1);
    let complex = &list.selectors[0];
    assert_eq!(complex.parts.len(), 1);
    assert_eq!(
        complex.parts[0].compound.selectors[0],
        Selector::Type("Button".to_string())
    );
}

#[test]
fn test_class_selector_with_double_hyphen() {
    let (_, list) = parse_selector_list(".datatable--cursor").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Class("datatable--cursor".to_string())
    );
}

#[test]
fn test_id_selector() {
    let (_, list) = parse_selector_list("#sidebar").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Id("sidebar".to_string())
    );
}

#[test]
fn test_universal_selector() {
    let (_, list) = parse_selector_list("*").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Universal
    );
}

#[test]
fn test_pseudo_class_selector() {
    let (_, list) = parse_selector_list("Button:hover").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(compound.selectors.len(), 2);
    assert_eq!(compound.selectors[1], Selector::PseudoClass(PseudoClass::Hover));
}

#[test]
fn test_focus_within_pseudo_class() {
    let (_, list) = parse_selector_list("RunContent:focus-within").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(
        compound.selectors[1],
        Selector::PseudoClass(PseudoClass::FocusWithin)
    );
}

// ============================================================================
// COMPOUND SELECTORS
// ============================================================================

#[test]
fn test_compound_type_class_id() {
    let (_, list) = parse_selector_list("Button.primary#submit").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(compound.selectors.len(), 3);
    assert_eq!(compound.selectors[0], Selector::Type("Button".to_string()));
    assert_eq!(
        compound.selectors[1],
        Selector::Class("primary".to_string())
    );
    assert_eq!(compound.selectors[2], Selector::Id("submit".to_string()));
}

#[test]
fn test_compound_with_multiple_pseudo_classes() {
    let (_, list) = parse_selector_list("Button:focus:hover").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(compound.selectors.len(), 3);
    assert_eq!(compound.selectors[1], Selector::PseudoClass(PseudoClass::Focus));
    assert_eq!(compound.selectors[2], Selector::PseudoClass(PseudoClass::Hover));
}

// ============================================================================
// COMBINATORS
// ============================================================================

#[test]
fn test_descendant_combinator() {
    let (_, list) = parse_selector_list("Container Button").unwrap();
    let complex = &list.selectors[0];
    assert_eq!(complex.parts.len(), 2);
    assert_eq!(complex.parts[0].combinator, Combinator::Descendant);
    assert_eq!(complex.parts[1].combinator, Combinator::None);
}

#[test]
fn test_child_combinator() {
    let (_, list) = parse_selector_list("Container > Button").unwrap();
    let complex = &list.selectors[0];
    assert_eq!(complex.parts.len(), 2);
    assert_eq!(complex.parts[0].combinator, Combinator::Child);
}

#[test]
fn test_three_level_mixed_combinators() {
    let (_, list) = parse_selector_list("Screen > Container .label").unwrap();
    let complex = &list.selectors[0];
    assert_eq!(complex.parts.len(), 3);
    assert_eq!(complex.parts[0].combinator, Combinator::Child);
    assert_eq!(complex.parts[1].combinator, Combinator::Descendant);
    assert_eq!(complex.parts[2].combinator, Combinator::None);
}

// ============================================================================
// SELECTOR LISTS
// ============================================================================

#[test]
fn test_selector_list_two_groups() {
    let (_, list) = parse_selector_list("Button, .primary").unwrap();
    assert_eq!(list.selectors.len(), 2);
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Type("Button".to_string())
    );
    assert_eq!(
        list.selectors[1].parts[0].compound.selectors[0],
        Selector::Class("primary".to_string())
    );
}

#[test]
fn test_selector_list_expands_to_separate_rules() {
    let sheet = parse_stylesheet("Header, Footer { height: 3; }").unwrap();
    // Each group keeps its own selector but shares the declarations.
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selectors.selectors.len(), 2);
}

// ============================================================================
// SPECIFICITY
// ============================================================================

#[test]
fn test_specificity_ordering() {
    let spec = |s: &str| {
        let (_, list) = parse_selector_list(s).unwrap();
        list.selectors[0].specificity()
    };

    assert!(spec("#id") > spec(".a.b.c"));
    assert!(spec(".a") > spec("Button"));
    assert!(spec("Button:hover") > spec("Button"));
    assert_eq!(spec("Button:hover"), spec("Button.primary"));
    assert_eq!(spec("*"), Specificity::default());
}

#[test]
fn test_pseudo_class_counts_as_class_specificity() {
    let (_, list) = parse_selector_list("DataTable:focus .datatable--cursor").unwrap();
    let spec = list.selectors[0].specificity();
    assert_eq!(spec.ids, 0);
    assert_eq!(spec.classes, 2);
    assert_eq!(spec.types, 1);
}

// ============================================================================
// REJECTED SYNTAX
// ============================================================================

#[test]
fn test_unknown_pseudo_class_is_an_error() {
    let err = parse_stylesheet("Button:first-child { color: red; }").unwrap_err();
    assert!(matches!(err, tuicss::StyleError::Parse { .. }));
}

#[test]
fn test_sibling_combinator_is_an_error() {
    let err = parse_stylesheet("Button + Label { color: red; }").unwrap_err();
    assert!(matches!(err, tuicss::StyleError::Parse { .. }));
}

#[test]
fn test_parse_error_reports_line_number() {
    // The error must point into the broken rule's block, not at the end
    // of the rule that parsed successfully before it.
    let source = "Button {\n    color: red;\n}\n\nLabel {\n    color @ bad\n}\n";
    match parse_stylesheet(source).unwrap_err() {
        tuicss::StyleError::Parse { line, .. } => assert_eq!(line, 6, "line was {line}"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_error_after_valid_declarations_points_at_offender() {
    let source = "Button {\n    width: 10;\n    colr @@;\n}\n";
    match parse_stylesheet(source).unwrap_err() {
        tuicss::StyleError::Parse { line, .. } => assert_eq!(line, 3, "line was {line}"),
        other => panic!("expected parse error, got {other:?}"),
    }
}
