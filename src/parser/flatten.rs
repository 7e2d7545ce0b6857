//! Nested rule flattening.
//!
//! Rules may nest with the `&` parent marker or a bare selector:
//!
//! ```text
//! Button {
//!     color: white;
//!     &:hover { background: blue; }
//!     Label { margin: 1; }
//! }
//! ```
//!
//! flattens to three independent top-level rules:
//!
//! ```text
//! Button { color: white; }
//! Button:hover { background: blue; }
//! Button Label { margin: 1; }
//! ```
//!
//! `&` extends the parent's rightmost compound selector in place; a bare
//! nested selector attaches with a descendant combinator. Output order
//! follows source order, which the cascade relies on for tie-breaking.

use crate::parser::stylesheet::{
    Combinator, ComplexSelector, Rule, RuleItem, Selector, SelectorList, StyleRule, StyleSheet,
};

/// Flattens parsed rules into a flat stylesheet, resolving `&` nesting.
pub fn flatten_stylesheet(raw_rules: Vec<Rule>) -> StyleSheet {
    let mut flat_rules = Vec::new();
    for rule in raw_rules {
        flatten_rule(&rule, &mut flat_rules);
    }
    StyleSheet {
        rules: flat_rules,
        variables: Default::default(),
    }
}

fn flatten_rule(rule: &Rule, output: &mut Vec<StyleRule>) {
    let declarations: Vec<_> = rule
        .items
        .iter()
        .filter_map(|item| match item {
            RuleItem::Declaration(decl) => Some(decl.clone()),
            RuleItem::NestedRule(_) => None,
        })
        .collect();

    // A block holding only nested rules contributes no rule of its own.
    if !declarations.is_empty() {
        output.push(StyleRule {
            selectors: rule.selectors.clone(),
            declarations,
        });
    }

    for item in &rule.items {
        if let RuleItem::NestedRule(nested) = item {
            let combined = combine_selectors(
                &rule.selectors.selectors,
                &nested.selectors.selectors,
            );
            let lifted = Rule {
                selectors: SelectorList::new(combined),
                items: nested.items.clone(),
            };
            flatten_rule(&lifted, output);
        }
    }
}

/// Cross-product of parent and child selector groups.
fn combine_selectors(
    parents: &[ComplexSelector],
    children: &[ComplexSelector],
) -> Vec<ComplexSelector> {
    let mut combined = Vec::new();
    for parent in parents {
        for child in children {
            combined.push(combine_one(parent, child));
        }
    }
    combined
}

fn combine_one(parent: &ComplexSelector, child: &ComplexSelector) -> ComplexSelector {
    let mut parts = parent.parts.clone();
    let child_parts = &child.parts;

    let Some(first_child) = child_parts.first() else {
        return ComplexSelector::new(parts);
    };

    let has_parent_marker = first_child
        .compound
        .selectors
        .iter()
        .any(|s| matches!(s, Selector::Parent));

    if has_parent_marker {
        // `&:hover`, `&.cls`: append constraints to the parent's
        // rightmost compound. `& > Foo` additionally sets the combinator
        // toward the following child part.
        if let Some(last) = parts.last_mut() {
            for s in &first_child.compound.selectors {
                if !matches!(s, Selector::Parent) {
                    last.compound.selectors.push(s.clone());
                }
            }
            if first_child.combinator != Combinator::None {
                last.combinator = first_child.combinator;
            }
        }
        parts.extend(child_parts.iter().skip(1).cloned());
    } else {
        // Bare nested selector: descendant of the parent.
        if let Some(last) = parts.last_mut() {
            if last.combinator == Combinator::None {
                last.combinator = Combinator::Descendant;
            }
        }
        parts.extend(child_parts.iter().cloned());
    }

    ComplexSelector::new(parts)
}
