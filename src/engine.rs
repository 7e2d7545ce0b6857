//! The style engine: sheet lifecycle, per-node cache, and invalidation.
//!
//! The engine sits between the tree collaborator and the cascade. It owns
//! the loaded sheet (stylesheet + variable table + rule index) and a
//! per-node computed-style cache; it never owns tree nodes. Node
//! snapshots and ancestor chains are borrowed per call.
//!
//! Sheet reload is an atomic swap: a parse failure leaves the previous
//! sheet fully active, a success replaces it and clears the cache so
//! every node is re-resolved on next access.

use std::collections::HashMap;
use std::path::Path;

use crate::cascade::{NodeId, NodeState, StateFlags, compute_style};
use crate::error::StyleError;
use crate::index::RuleIndex;
use crate::parser::{StyleSheet, parse_stylesheet};
use crate::types::ComputedStyle;

/// Tree mutations the engine is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeChange {
    Inserted,
    Removed,
}

/// A cached resolution, together with everything needed to decide
/// whether a later change invalidates it.
#[derive(Debug, Clone)]
struct CacheEntry {
    style: ComputedStyle,
    /// Ancestor chain at resolution time, immediate parent first.
    ancestor_ids: Vec<NodeId>,
    /// State flags on the node itself that any candidate rule reads.
    state_deps: StateFlags,
    /// State flags on ancestors that any candidate rule reads.
    ancestor_deps: StateFlags,
}

/// Style resolution engine for one widget tree.
///
/// Single-threaded and synchronous: calls are expected from the thread
/// that dispatches UI state changes, so resolution never races a reload.
#[derive(Debug, Default)]
pub struct StyleEngine {
    sheet: StyleSheet,
    index: RuleIndex,
    cache: HashMap<NodeId, CacheEntry>,
}

impl StyleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and atomically installs a new sheet.
    ///
    /// On error the previously loaded sheet (and its cache) stays active.
    /// On success the cache is cleared, scheduling every node for full
    /// re-resolution.
    pub fn load_sheet(&mut self, source: &str) -> Result<(), StyleError> {
        let sheet = parse_stylesheet(source)?;
        let index = RuleIndex::build(&sheet);
        log::debug!("loaded stylesheet: {} indexed selectors", index.len());

        self.sheet = sheet;
        self.index = index;
        self.cache.clear();
        Ok(())
    }

    /// Reads a sheet from disk and installs it.
    pub fn load_sheet_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), StyleError> {
        let source = std::fs::read_to_string(path)?;
        self.load_sheet(&source)
    }

    /// The number of indexed selectors in the active sheet.
    pub fn rule_count(&self) -> usize {
        self.index.len()
    }

    /// Computes (or returns the cached) style for a node.
    ///
    /// The result is a pure function of the loaded sheet, the node
    /// snapshot, and the ancestor chain; the cache only short-circuits
    /// recomputation and never changes the outcome.
    pub fn resolve(&mut self, node: &NodeState, ancestors: &[NodeState]) -> ComputedStyle {
        let ancestor_ids: Vec<NodeId> = ancestors.iter().map(|a| a.node).collect();

        if let Some(entry) = self.cache.get(&node.node) {
            if entry.ancestor_ids == ancestor_ids {
                log::trace!("style cache hit for node {:?}", node.node);
                return entry.style.clone();
            }
        }

        let style = compute_style(node, ancestors, &self.sheet, &self.index);

        // Record which state flags this node's candidate rules read.
        // Candidates are state-independent, so the dependency sets stay
        // valid until the tree around the node changes.
        let mut state_deps = StateFlags::empty();
        let mut ancestor_deps = StateFlags::empty();
        for entry in self.index.candidates(node) {
            state_deps |= entry.self_deps();
            ancestor_deps |= entry.ancestor_deps();
        }

        log::trace!(
            "resolved node {:?} ({}): deps={:?} ancestor_deps={:?}",
            node.node,
            node.type_name,
            state_deps,
            ancestor_deps,
        );

        self.cache.insert(
            node.node,
            CacheEntry {
                style: style.clone(),
                ancestor_ids,
                state_deps,
                ancestor_deps,
            },
        );
        style
    }

    /// Invalidates cached styles affected by a pseudo-state transition on
    /// `node`.
    ///
    /// The node itself is evicted only when one of its candidate rules
    /// reads a changed flag. Cached descendants are evicted only when
    /// some rule reads the changed flags in ancestor position (e.g.
    /// `:focus-within` on a container), keeping the work proportional to
    /// the change's blast radius.
    pub fn notify_state_changed(&mut self, node: NodeId, changed: StateFlags) {
        if let Some(entry) = self.cache.get(&node) {
            if entry.state_deps.intersects(changed) {
                self.cache.remove(&node);
                log::trace!("invalidated node {node:?} after state change {changed:?}");
            }
        }

        if changed.intersects(self.index.ancestor_state_deps()) {
            self.cache.retain(|id, entry| {
                let affected = entry.ancestor_ids.contains(&node)
                    && entry.ancestor_deps.intersects(changed);
                if affected {
                    log::trace!("invalidated descendant {id:?} after state change on {node:?}");
                }
                !affected
            });
        }
    }

    /// Invalidates cached styles after a tree mutation at `node`.
    ///
    /// Position-dependent matches (descendant/child combinators) can
    /// change for the whole subtree, so any entry that recorded `node`
    /// as an ancestor is evicted alongside the node itself.
    pub fn notify_tree_changed(&mut self, node: NodeId, change: TreeChange) {
        log::trace!("tree change {change:?} at node {node:?}");
        self.cache.remove(&node);
        self.cache
            .retain(|_, entry| !entry.ancestor_ids.contains(&node));
    }

    /// Drops every cached style without touching the loaded sheet.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// The active stylesheet, if one loaded successfully.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.sheet
    }
}
