//! Border styling types.
//!
//! Declarations carry a [`BorderEdgeExpr`] whose color is an unevaluated
//! expression, so variable references resolve against the currently loaded
//! variable table when the cascade runs. Computed styles carry the
//! resolved [`BorderEdge`] form.

use std::fmt;

use crate::types::color::{ColorExpr, Rgba};

/// The visual style of a border edge, drawn with terminal characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderKind {
    /// No border (default).
    #[default]
    None,
    /// ASCII-only border using +, -, and | characters.
    Ascii,
    /// Invisible border that still occupies space.
    Blank,
    /// Block characters for a filled appearance.
    Block,
    /// Double-line border.
    Double,
    /// Dashed line border.
    Dashed,
    /// Heavy/bold line border.
    Heavy,
    /// Horizontal key-cap style.
    Hkey,
    /// Inner half-block border.
    Inner,
    /// Outer half-block border.
    Outer,
    /// Panel style border.
    Panel,
    /// Rounded corner border.
    Round,
    /// Standard solid line border.
    Solid,
    /// Tall half-block border.
    Tall,
    /// Extra-thick border.
    Thick,
    /// Vertical key-cap style.
    Vkey,
    /// Wide half-block border.
    Wide,
}

impl BorderKind {
    /// Maps a stylesheet keyword to a border kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "none" | "hidden" => Some(Self::None),
            "ascii" => Some(Self::Ascii),
            "blank" => Some(Self::Blank),
            "block" => Some(Self::Block),
            "dashed" => Some(Self::Dashed),
            "double" => Some(Self::Double),
            "heavy" => Some(Self::Heavy),
            "hkey" => Some(Self::Hkey),
            "inner" => Some(Self::Inner),
            "outer" => Some(Self::Outer),
            "panel" => Some(Self::Panel),
            "round" => Some(Self::Round),
            "solid" => Some(Self::Solid),
            "tall" => Some(Self::Tall),
            "thick" => Some(Self::Thick),
            "vkey" => Some(Self::Vkey),
            "wide" => Some(Self::Wide),
            _ => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ascii => "ascii",
            Self::Blank => "blank",
            Self::Block => "block",
            Self::Dashed => "dashed",
            Self::Double => "double",
            Self::Heavy => "heavy",
            Self::Hkey => "hkey",
            Self::Inner => "inner",
            Self::Outer => "outer",
            Self::Panel => "panel",
            Self::Round => "round",
            Self::Solid => "solid",
            Self::Tall => "tall",
            Self::Thick => "thick",
            Self::Vkey => "vkey",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for BorderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A border edge as written in a declaration, color still unevaluated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderEdgeExpr {
    pub kind: BorderKind,
    pub color: Option<ColorExpr>,
}

impl fmt::Display for BorderEdgeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(color) = &self.color {
            write!(f, " {color}")?;
        }
        Ok(())
    }
}

/// A resolved border edge in a computed style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderEdge {
    pub kind: BorderKind,
    pub color: Option<Rgba>,
}

/// Complete border definition for all four sides of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border {
    pub top: BorderEdge,
    pub right: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
}

impl Border {
    /// Creates a border with the same edge style on all four sides.
    pub fn all(edge: BorderEdge) -> Self {
        Self {
            top: edge,
            right: edge,
            bottom: edge,
            left: edge,
        }
    }

    /// Returns `true` if no border edges are visible.
    pub fn is_none(&self) -> bool {
        self.top.kind == BorderKind::None
            && self.right.kind == BorderKind::None
            && self.bottom.kind == BorderKind::None
            && self.left.kind == BorderKind::None
    }
}
