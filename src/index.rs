//! Rule indexing.
//!
//! The index is rebuilt once per sheet load and is immutable afterwards.
//! Each (complex selector, rule) pair becomes one entry, bucketed by the
//! rightmost compound's most discriminating key (id, else first class,
//! else pseudo-class, else type, else universal), so candidate gathering
//! touches far fewer entries than the full rule list. Candidates are a
//! superset; the matcher still verifies each one.
//!
//! Buckets never key on *current* state: pseudo-keyed entries are
//! candidates for every node. That keeps a node's candidate set stable
//! across state transitions, which the invalidation controller relies on
//! when it records per-node state dependencies.

use std::collections::HashMap;

use crate::cascade::{NodeState, StateFlags};
use crate::parser::stylesheet::{ComplexSelector, Declaration, Selector, Specificity};
use crate::parser::StyleSheet;

/// One indexed (selector, declarations) pair.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    selector: ComplexSelector,
    declarations: Vec<Declaration>,
    specificity: Specificity,
    source_order: usize,
    self_deps: StateFlags,
    ancestor_deps: StateFlags,
}

impl IndexEntry {
    pub fn selector(&self) -> &ComplexSelector {
        &self.selector
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    pub fn source_order(&self) -> usize {
        self.source_order
    }

    /// State flags referenced by the rightmost compound. Transitions of
    /// these on the node itself can change whether this entry matches.
    pub fn self_deps(&self) -> StateFlags {
        self.self_deps
    }

    /// State flags referenced by ancestor parts. Transitions of these on
    /// an ancestor can change whether this entry matches.
    pub fn ancestor_deps(&self) -> StateFlags {
        self.ancestor_deps
    }

    /// Rough selector rendering for diagnostics.
    pub fn selector_text(&self) -> String {
        let mut out = String::new();
        for part in &self.selector.parts {
            for simple in &part.compound.selectors {
                match simple {
                    Selector::Type(name) => out.push_str(name),
                    Selector::Class(name) => {
                        out.push('.');
                        out.push_str(name);
                    }
                    Selector::Id(name) => {
                        out.push('#');
                        out.push_str(name);
                    }
                    Selector::Universal => out.push('*'),
                    Selector::PseudoClass(pseudo) => {
                        out.push(':');
                        out.push_str(pseudo.name());
                    }
                    Selector::Parent => out.push('&'),
                }
            }
            match part.combinator {
                crate::parser::Combinator::Descendant => out.push(' '),
                crate::parser::Combinator::Child => out.push_str(" > "),
                crate::parser::Combinator::None => {}
            }
        }
        out
    }
}

/// Bucketed view of a flattened stylesheet.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    entries: Vec<IndexEntry>,
    by_id: HashMap<String, Vec<usize>>,
    by_class: HashMap<String, Vec<usize>>,
    by_type: HashMap<String, Vec<usize>>,
    /// Entries whose rightmost key is a pseudo-class.
    stateful: Vec<usize>,
    universal: Vec<usize>,
    /// Union of every entry's ancestor deps, for invalidation pruning.
    ancestor_deps: StateFlags,
}

impl RuleIndex {
    /// Builds the index. O(total selector count); run once per load.
    pub fn build(sheet: &StyleSheet) -> Self {
        let mut index = Self::default();

        for (source_order, rule) in sheet.rules.iter().enumerate() {
            for selector in &rule.selectors.selectors {
                let (self_deps, ancestor_deps) = state_dependencies(selector);
                index.ancestor_deps |= ancestor_deps;

                let entry_idx = index.entries.len();
                index.entries.push(IndexEntry {
                    selector: selector.clone(),
                    declarations: rule.declarations.clone(),
                    specificity: selector.specificity(),
                    source_order,
                    self_deps,
                    ancestor_deps,
                });
                index.bucket(entry_idx);
            }
        }

        index
    }

    fn bucket(&mut self, entry_idx: usize) {
        let rightmost = self.entries[entry_idx]
            .selector
            .parts
            .last()
            .map(|part| part.compound.selectors.as_slice())
            .unwrap_or_default();

        let mut first_class = None;
        let mut type_name = None;
        let mut has_pseudo = false;
        for simple in rightmost {
            match simple {
                Selector::Id(id) => {
                    self.by_id.entry(id.clone()).or_default().push(entry_idx);
                    return;
                }
                Selector::Class(class) if first_class.is_none() => {
                    first_class = Some(class.clone());
                }
                Selector::Type(name) if type_name.is_none() => {
                    type_name = Some(name.clone());
                }
                Selector::PseudoClass(_) => has_pseudo = true,
                _ => {}
            }
        }

        if let Some(class) = first_class {
            self.by_class.entry(class).or_default().push(entry_idx);
        } else if has_pseudo {
            self.stateful.push(entry_idx);
        } else if let Some(name) = type_name {
            self.by_type.entry(name).or_default().push(entry_idx);
        } else {
            self.universal.push(entry_idx);
        }
    }

    /// Entries that could match the node, a superset still checked by
    /// the matcher, returned in source order without duplicates. The set
    /// does not depend on the node's current state flags.
    pub fn candidates(&self, node: &NodeState) -> impl Iterator<Item = &IndexEntry> {
        let mut indices = Vec::new();

        if let Some(id) = &node.id {
            if let Some(bucket) = self.by_id.get(id) {
                indices.extend_from_slice(bucket);
            }
        }
        for class in &node.classes {
            if let Some(bucket) = self.by_class.get(class) {
                indices.extend_from_slice(bucket);
            }
        }
        if let Some(bucket) = self.by_type.get(node.type_name) {
            indices.extend_from_slice(bucket);
        }
        indices.extend_from_slice(&self.stateful);
        indices.extend_from_slice(&self.universal);

        indices.sort_unstable();
        indices.dedup();
        indices.into_iter().map(|i| &self.entries[i])
    }

    /// Union of state flags referenced in ancestor position by any rule.
    /// When a change does not intersect this, no descendant of the
    /// changed node can be affected through the ancestor chain.
    pub fn ancestor_state_deps(&self) -> StateFlags {
        self.ancestor_deps
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects the state flags a selector depends on, split into flags on
/// the rightmost compound (the node itself) and flags on ancestor parts.
fn state_dependencies(selector: &ComplexSelector) -> (StateFlags, StateFlags) {
    let mut self_deps = StateFlags::empty();
    let mut ancestor_deps = StateFlags::empty();

    let last_idx = selector.parts.len().saturating_sub(1);
    for (i, part) in selector.parts.iter().enumerate() {
        for simple in &part.compound.selectors {
            if let Selector::PseudoClass(pseudo) = simple {
                if i == last_idx {
                    self_deps |= pseudo.state_dependency();
                } else {
                    ancestor_deps |= pseudo.state_dependency();
                }
            }
        }
    }

    (self_deps, ancestor_deps)
}
