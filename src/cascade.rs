//! Selector matching and cascade resolution.
//!
//! The matcher evaluates complex selectors right-to-left against a node
//! snapshot and its ancestor chain; [`compute_style`] collects matching
//! rules through the [`RuleIndex`](crate::index::RuleIndex), orders them
//! by specificity then source order, and applies declarations so the
//! winning value per property is the most specific, latest-declared one.
//!
//! All inputs are borrowed snapshots supplied by the caller; nothing here
//! holds state between invocations.

use bitflags::bitflags;

use crate::index::RuleIndex;
use crate::parser::stylesheet::{
    Combinator, ComplexSelector, CompoundSelector, Declaration, PseudoClass, SelectorPart,
};
use crate::parser::{Selector, StyleSheet};
use crate::types::{Border, BorderEdge, BorderEdgeExpr, ComputedStyle};

bitflags! {
    /// Pseudo-state flags reported by the tree collaborator.
    ///
    /// `FOCUS` and `FOCUS_WITHIN` are independent: a container can hold a
    /// focused descendant without being focused itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StateFlags: u8 {
        /// Node has keyboard focus.
        const FOCUS        = 0b0000_0001;
        /// Pointer is over the node.
        const HOVER        = 0b0000_0010;
        /// Node is being pressed.
        const ACTIVE       = 0b0000_0100;
        /// Node is not interactive.
        const DISABLED     = 0b0000_1000;
        /// A descendant of the node has keyboard focus.
        const FOCUS_WITHIN = 0b0001_0000;
    }
}

impl PseudoClass {
    /// The state flags whose transitions can change whether this
    /// pseudo-class matches. `:blur` is sensitive to focus transitions.
    pub fn state_dependency(&self) -> StateFlags {
        match self {
            Self::Focus | Self::Blur => StateFlags::FOCUS,
            Self::Hover => StateFlags::HOVER,
            Self::Active => StateFlags::ACTIVE,
            Self::Disabled => StateFlags::DISABLED,
            Self::FocusWithin => StateFlags::FOCUS_WITHIN,
        }
    }
}

/// Opaque identity of an externally owned tree node, used as the style
/// cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Read-only snapshot of the matching-relevant state of one node.
///
/// The engine borrows snapshots for the duration of a resolution call and
/// never owns tree nodes.
#[derive(Clone, Debug)]
pub struct NodeState {
    pub node: NodeId,
    /// Widget type name (e.g. "Button", "DataTable").
    pub type_name: &'static str,
    /// Unique id, if set (the `#id` selector target).
    pub id: Option<String>,
    /// Style classes (the `.class` selector targets).
    pub classes: Vec<String>,
    /// Current pseudo-state flags.
    pub states: StateFlags,
}

impl NodeState {
    pub fn new(node: NodeId, type_name: &'static str) -> Self {
        Self {
            node,
            type_name,
            id: None,
            classes: Vec::new(),
            states: StateFlags::empty(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_states(mut self, states: StateFlags) -> Self {
        self.states = states;
        self
    }

    /// Tests one simple selector against this node.
    pub fn matches_selector(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Type(name) => self.type_name == name,
            Selector::Id(id) => self.id.as_deref() == Some(id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Universal => true,
            Selector::PseudoClass(pseudo) => self.matches_pseudo(*pseudo),
            // `&` markers are resolved away during flattening.
            Selector::Parent => false,
        }
    }

    fn matches_pseudo(&self, pseudo: PseudoClass) -> bool {
        match pseudo {
            PseudoClass::Focus => self.states.contains(StateFlags::FOCUS),
            PseudoClass::Blur => !self.states.contains(StateFlags::FOCUS),
            PseudoClass::Hover => self.states.contains(StateFlags::HOVER),
            PseudoClass::Active => self.states.contains(StateFlags::ACTIVE),
            PseudoClass::Disabled => self.states.contains(StateFlags::DISABLED),
            PseudoClass::FocusWithin => self.states.contains(StateFlags::FOCUS_WITHIN),
        }
    }

    fn matches_compound(&self, compound: &CompoundSelector) -> bool {
        compound.selectors.iter().all(|s| self.matches_selector(s))
    }

    /// Tests a complex selector against this node given its ancestors,
    /// ordered from immediate parent to root.
    ///
    /// Evaluation is right-to-left: the rightmost compound must match the
    /// node itself; earlier parts walk up the ancestor chain, where the
    /// descendant combinator may skip ancestors (with backtracking) and
    /// the child combinator binds to the immediate parent.
    pub fn matches_complex(&self, complex: &ComplexSelector, ancestors: &[NodeState]) -> bool {
        let Some((last, rest)) = complex.parts.split_last() else {
            return false;
        };
        if !self.matches_compound(&last.compound) {
            return false;
        }
        matches_ancestor_parts(rest, ancestors)
    }
}

/// Matches the non-rightmost selector parts against the ancestor chain.
/// `ancestors[0]` is the immediate parent of the position already matched.
fn matches_ancestor_parts(parts: &[SelectorPart], ancestors: &[NodeState]) -> bool {
    let Some((part, rest)) = parts.split_last() else {
        return true;
    };

    match part.combinator {
        Combinator::Child => {
            let Some((parent, higher)) = ancestors.split_first() else {
                return false;
            };
            parent.matches_compound(&part.compound) && matches_ancestor_parts(rest, higher)
        }
        Combinator::Descendant | Combinator::None => {
            for (i, ancestor) in ancestors.iter().enumerate() {
                if ancestor.matches_compound(&part.compound)
                    && matches_ancestor_parts(rest, &ancestors[i + 1..])
                {
                    return true;
                }
            }
            false
        }
    }
}

/// Computes the final style for a node.
///
/// A pure function of (stylesheet, node snapshot, ancestor chain): rules
/// are gathered through the index, filtered by the matcher, ordered by
/// (specificity, source order) ascending, and applied in order so the
/// highest-priority declaration for each property lands last. Color
/// expressions are evaluated against the sheet's variable table here.
pub fn compute_style(
    node: &NodeState,
    ancestors: &[NodeState],
    sheet: &StyleSheet,
    index: &RuleIndex,
) -> ComputedStyle {
    let mut matched: Vec<_> = index
        .candidates(node)
        .filter(|entry| node.matches_complex(entry.selector(), ancestors))
        .collect();

    matched.sort_by_key(|entry| (entry.specificity(), entry.source_order()));

    // Identical (specificity, source order) pairs would make the winner
    // order-dependent; flag them, then let last-applied win.
    for pair in matched.windows(2) {
        if pair[0].specificity() == pair[1].specificity()
            && pair[0].source_order() == pair[1].source_order()
        {
            log::debug!(
                "ambiguous cascade priority for {} on node {:?}",
                pair[1].selector_text(),
                node.node
            );
        }
    }

    let mut computed = ComputedStyle::default();
    for entry in matched {
        for declaration in entry.declarations() {
            apply_declaration(&mut computed, declaration, sheet);
        }
    }
    computed
}

fn resolve_edge(edge: &BorderEdgeExpr, sheet: &StyleSheet) -> BorderEdge {
    BorderEdge {
        kind: edge.kind,
        color: edge.color.as_ref().map(|c| sheet.variables.eval_color(c)),
    }
}

fn apply_declaration(style: &mut ComputedStyle, declaration: &Declaration, sheet: &StyleSheet) {
    let vars = &sheet.variables;
    match declaration {
        Declaration::Color(c) => style.color = Some(vars.eval_color(c)),
        Declaration::Background(c) => style.background = Some(vars.eval_color(c)),
        Declaration::Tint(c) => style.tint = Some(vars.eval_color(c)),
        Declaration::Width(s) => style.width = Some(*s),
        Declaration::Height(s) => style.height = Some(*s),
        Declaration::MinWidth(s) => style.min_width = Some(*s),
        Declaration::MaxWidth(s) => style.max_width = Some(*s),
        Declaration::MinHeight(s) => style.min_height = Some(*s),
        Declaration::MaxHeight(s) => style.max_height = Some(*s),
        Declaration::Margin(s) => style.margin = *s,
        Declaration::MarginTop(s) => style.margin.top = *s,
        Declaration::MarginRight(s) => style.margin.right = *s,
        Declaration::MarginBottom(s) => style.margin.bottom = *s,
        Declaration::MarginLeft(s) => style.margin.left = *s,
        Declaration::Padding(s) => style.padding = *s,
        Declaration::PaddingTop(s) => style.padding.top = *s,
        Declaration::PaddingRight(s) => style.padding.right = *s,
        Declaration::PaddingBottom(s) => style.padding.bottom = *s,
        Declaration::PaddingLeft(s) => style.padding.left = *s,
        Declaration::Border(edge) => style.border = Border::all(resolve_edge(edge, sheet)),
        Declaration::BorderTop(edge) => style.border.top = resolve_edge(edge, sheet),
        Declaration::BorderRight(edge) => style.border.right = resolve_edge(edge, sheet),
        Declaration::BorderBottom(edge) => style.border.bottom = resolve_edge(edge, sheet),
        Declaration::BorderLeft(edge) => style.border.left = resolve_edge(edge, sheet),
        Declaration::TextStyleDecl(s) => style.text_style = *s,
        Declaration::TextAlign(a) => style.text_align = *a,
        Declaration::Align(h, v) => {
            style.align_horizontal = *h;
            style.align_vertical = *v;
        }
        Declaration::AlignHorizontal(h) => style.align_horizontal = *h,
        Declaration::AlignVertical(v) => style.align_vertical = *v,
        Declaration::ContentAlign(h, v) => {
            style.content_align_horizontal = *h;
            style.content_align_vertical = *v;
        }
        Declaration::ContentAlignHorizontal(h) => style.content_align_horizontal = *h,
        Declaration::ContentAlignVertical(v) => style.content_align_vertical = *v,
        Declaration::Display(d) => style.display = *d,
        Declaration::Visibility(v) => style.visibility = *v,
        Declaration::Opacity(o) => style.opacity = *o,
        Declaration::Overflow(x, y) => {
            style.overflow_x = *x;
            style.overflow_y = *y;
        }
        Declaration::OverflowX(o) => style.overflow_x = *o,
        Declaration::OverflowY(o) => style.overflow_y = *o,
        Declaration::Dock(d) => style.dock = Some(*d),
        Declaration::ScrollbarGutter(g) => style.scrollbar_gutter = *g,
        Declaration::Unknown(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RuleIndex;
    use crate::parser::parse_stylesheet;
    use crate::types::geometry::Unit;

    fn resolve(css: &str, node: &NodeState, ancestors: &[NodeState]) -> ComputedStyle {
        let sheet = parse_stylesheet(css).expect("valid stylesheet");
        let index = RuleIndex::build(&sheet);
        compute_style(node, ancestors, &sheet, &index)
    }

    #[test]
    fn id_selector_overrides_type_selector() {
        let css = r#"
            Container { width: 10; height: 10; }
            #sidebar { height: auto; }
        "#;
        let node = NodeState::new(NodeId(1), "Container").with_id("sidebar");
        let style = resolve(css, &node, &[]);

        let height = style.height.expect("height should be set");
        assert_eq!(height.unit, Unit::Auto);
        assert_eq!(style.width.expect("width").value, 10.0);
    }

    #[test]
    fn later_rule_wins_on_equal_specificity() {
        let css = r#"
            Button { opacity: 0.2; }
            Button { opacity: 0.8; }
        "#;
        let node = NodeState::new(NodeId(1), "Button");
        let style = resolve(css, &node, &[]);
        assert_eq!(style.opacity, 0.8);
    }

    #[test]
    fn child_combinator_requires_immediate_parent() {
        let css = "Screen > Button { opacity: 0.5; }";
        let node = NodeState::new(NodeId(3), "Button");

        let parent = NodeState::new(NodeId(2), "Screen");
        let style = resolve(css, &node, &[parent]);
        assert_eq!(style.opacity, 0.5);

        let parent = NodeState::new(NodeId(2), "Vertical");
        let root = NodeState::new(NodeId(1), "Screen");
        let style = resolve(css, &node, &[parent, root]);
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn descendant_combinator_skips_levels() {
        let css = "Screen Button { opacity: 0.5; }";
        let node = NodeState::new(NodeId(3), "Button");
        let parent = NodeState::new(NodeId(2), "Vertical");
        let root = NodeState::new(NodeId(1), "Screen");
        let style = resolve(css, &node, &[parent, root]);
        assert_eq!(style.opacity, 0.5);
    }

    #[test]
    fn blur_matches_unfocused_node() {
        let css = r#"
            Input:focus { opacity: 1.0; }
            Input:blur { opacity: 0.4; }
        "#;
        let unfocused = NodeState::new(NodeId(1), "Input");
        assert_eq!(resolve(css, &unfocused, &[]).opacity, 0.4);

        let focused = NodeState::new(NodeId(1), "Input").with_states(StateFlags::FOCUS);
        assert_eq!(resolve(css, &focused, &[]).opacity, 1.0);
    }
}
