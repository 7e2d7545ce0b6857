//! Core data structures for parsed stylesheets: selectors, declarations,
//! rules, and specificity.

use std::fmt;

use crate::types::{
    AlignHorizontal, AlignVertical, BorderEdgeExpr, ColorExpr, Display, Dock, Overflow, Scalar,
    ScrollbarGutter, Spacing, TextAlign, TextStyle, Visibility,
};

/// Selector weight for determining rule precedence.
///
/// Compared lexicographically: ids, then classes (pseudo-classes count as
/// classes), then types. Equal specificity falls back to source order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

/// Boolean runtime predicates usable in selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PseudoClass {
    /// Node has keyboard focus.
    Focus,
    /// Node does not have keyboard focus.
    Blur,
    /// Pointer is over the node.
    Hover,
    /// Node is being pressed.
    Active,
    /// Node is not interactive.
    Disabled,
    /// A descendant of the node has keyboard focus.
    FocusWithin,
}

impl PseudoClass {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "focus" => Some(Self::Focus),
            "blur" => Some(Self::Blur),
            "hover" => Some(Self::Hover),
            "active" => Some(Self::Active),
            "disabled" => Some(Self::Disabled),
            "focus-within" => Some(Self::FocusWithin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::FocusWithin => "focus-within",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    PseudoClass(PseudoClass),
    /// The `&` marker inside a nested block; removed during flattening.
    Parent,
}

/// A chain of simple selectors applying to one node (`Button.primary:hover`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity::default();
        for s in &self.selectors {
            match s {
                Selector::Id(_) => spec.ids += 1,
                Selector::Class(_) | Selector::PseudoClass(_) => spec.classes += 1,
                Selector::Type(_) => spec.types += 1,
                Selector::Universal | Selector::Parent => {}
            }
        }
        spec
    }
}

/// Relationship between a selector part and the part to its right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// Rightmost part; relates to the node itself.
    None,
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the immediate parent.
    Child,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

/// A full selector: compound parts joined by combinators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts.iter().map(|p| p.compound.specificity()).fold(
            Specificity::default(),
            |acc, x| Specificity {
                ids: acc.ids + x.ids,
                classes: acc.classes + x.classes,
                types: acc.types + x.types,
            },
        )
    }
}

/// Comma-separated selector group; each member matches independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }
}

/// A parsed property-value pair.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Color(ColorExpr),
    Background(ColorExpr),
    Tint(ColorExpr),
    Width(Scalar),
    Height(Scalar),
    MinWidth(Scalar),
    MaxWidth(Scalar),
    MinHeight(Scalar),
    MaxHeight(Scalar),
    Margin(Spacing),
    MarginTop(Scalar),
    MarginRight(Scalar),
    MarginBottom(Scalar),
    MarginLeft(Scalar),
    Padding(Spacing),
    PaddingTop(Scalar),
    PaddingRight(Scalar),
    PaddingBottom(Scalar),
    PaddingLeft(Scalar),
    Border(BorderEdgeExpr),
    BorderTop(BorderEdgeExpr),
    BorderRight(BorderEdgeExpr),
    BorderBottom(BorderEdgeExpr),
    BorderLeft(BorderEdgeExpr),
    TextStyleDecl(TextStyle),
    TextAlign(TextAlign),
    Align(AlignHorizontal, AlignVertical),
    AlignHorizontal(AlignHorizontal),
    AlignVertical(AlignVertical),
    ContentAlign(AlignHorizontal, AlignVertical),
    ContentAlignHorizontal(AlignHorizontal),
    ContentAlignVertical(AlignVertical),
    Display(Display),
    Visibility(Visibility),
    Opacity(f64),
    Overflow(Overflow, Overflow),
    OverflowX(Overflow),
    OverflowY(Overflow),
    Dock(Dock),
    ScrollbarGutter(ScrollbarGutter),
    /// Unrecognized property; parsed and ignored by the cascade.
    Unknown(String),
}

impl Declaration {
    /// The stylesheet property name this declaration sets.
    pub fn property_name(&self) -> &str {
        match self {
            Self::Color(_) => "color",
            Self::Background(_) => "background",
            Self::Tint(_) => "tint",
            Self::Width(_) => "width",
            Self::Height(_) => "height",
            Self::MinWidth(_) => "min-width",
            Self::MaxWidth(_) => "max-width",
            Self::MinHeight(_) => "min-height",
            Self::MaxHeight(_) => "max-height",
            Self::Margin(_) => "margin",
            Self::MarginTop(_) => "margin-top",
            Self::MarginRight(_) => "margin-right",
            Self::MarginBottom(_) => "margin-bottom",
            Self::MarginLeft(_) => "margin-left",
            Self::Padding(_) => "padding",
            Self::PaddingTop(_) => "padding-top",
            Self::PaddingRight(_) => "padding-right",
            Self::PaddingBottom(_) => "padding-bottom",
            Self::PaddingLeft(_) => "padding-left",
            Self::Border(_) => "border",
            Self::BorderTop(_) => "border-top",
            Self::BorderRight(_) => "border-right",
            Self::BorderBottom(_) => "border-bottom",
            Self::BorderLeft(_) => "border-left",
            Self::TextStyleDecl(_) => "text-style",
            Self::TextAlign(_) => "text-align",
            Self::Align(_, _) => "align",
            Self::AlignHorizontal(_) => "align-horizontal",
            Self::AlignVertical(_) => "align-vertical",
            Self::ContentAlign(_, _) => "content-align",
            Self::ContentAlignHorizontal(_) => "content-align-horizontal",
            Self::ContentAlignVertical(_) => "content-align-vertical",
            Self::Display(_) => "display",
            Self::Visibility(_) => "visibility",
            Self::Opacity(_) => "opacity",
            Self::Overflow(_, _) => "overflow",
            Self::OverflowX(_) => "overflow-x",
            Self::OverflowY(_) => "overflow-y",
            Self::Dock(_) => "dock",
            Self::ScrollbarGutter(_) => "scrollbar-gutter",
            Self::Unknown(name) => name,
        }
    }

    /// Color expressions referenced by this declaration, for variable
    /// validation and normalization after parsing.
    pub fn color_exprs_mut(&mut self) -> Vec<&mut ColorExpr> {
        match self {
            Self::Color(c) | Self::Background(c) | Self::Tint(c) => vec![c],
            Self::Border(b)
            | Self::BorderTop(b)
            | Self::BorderRight(b)
            | Self::BorderBottom(b)
            | Self::BorderLeft(b) => b.color.iter_mut().collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.property_name();
        match self {
            Self::Color(v) | Self::Background(v) | Self::Tint(v) => write!(f, "{name}: {v};"),
            Self::Width(v)
            | Self::Height(v)
            | Self::MinWidth(v)
            | Self::MaxWidth(v)
            | Self::MinHeight(v)
            | Self::MaxHeight(v)
            | Self::MarginTop(v)
            | Self::MarginRight(v)
            | Self::MarginBottom(v)
            | Self::MarginLeft(v)
            | Self::PaddingTop(v)
            | Self::PaddingRight(v)
            | Self::PaddingBottom(v)
            | Self::PaddingLeft(v) => write!(f, "{name}: {v};"),
            Self::Margin(v) | Self::Padding(v) => write!(f, "{name}: {v};"),
            Self::Border(v)
            | Self::BorderTop(v)
            | Self::BorderRight(v)
            | Self::BorderBottom(v)
            | Self::BorderLeft(v) => write!(f, "{name}: {v};"),
            Self::TextStyleDecl(v) => write!(f, "{name}: {v};"),
            Self::TextAlign(v) => write!(f, "{name}: {v};"),
            Self::Align(h, v) | Self::ContentAlign(h, v) => write!(f, "{name}: {h} {v};"),
            Self::AlignHorizontal(v) | Self::ContentAlignHorizontal(v) => {
                write!(f, "{name}: {v};")
            }
            Self::AlignVertical(v) | Self::ContentAlignVertical(v) => write!(f, "{name}: {v};"),
            Self::Display(v) => write!(f, "{name}: {v};"),
            Self::Visibility(v) => write!(f, "{name}: {v};"),
            Self::Opacity(v) => write!(f, "{name}: {v};"),
            Self::Overflow(x, y) => write!(f, "{name}: {x} {y};"),
            Self::OverflowX(v) | Self::OverflowY(v) => write!(f, "{name}: {v};"),
            Self::Dock(v) => write!(f, "{name}: {v};"),
            Self::ScrollbarGutter(v) => write!(f, "{name}: {v};"),
            Self::Unknown(_) => write!(f, "{name}: ;"),
        }
    }
}

/// An item inside a rule block: a declaration or a nested rule.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleItem {
    Declaration(Declaration),
    NestedRule(Rule),
}

/// A rule as parsed, possibly containing nested rules.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub selectors: SelectorList,
    pub items: Vec<RuleItem>,
}

impl Rule {
    pub fn new(selectors: SelectorList, items: Vec<RuleItem>) -> Self {
        Self { selectors, items }
    }
}

/// A flattened rule: nesting resolved, declarations only.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

/// A fully parsed and flattened stylesheet. Rule order is source order,
/// which the cascade uses for tie-breaking. The variable table travels
/// with the sheet so color expressions can be evaluated lazily.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    pub rules: Vec<StyleRule>,
    pub variables: crate::parser::variables::VariableTable,
}
