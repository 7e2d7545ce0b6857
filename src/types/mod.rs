pub mod border;
pub mod color;
pub mod geometry;
pub mod layout;
pub mod text;

pub use border::{Border, BorderEdge, BorderEdgeExpr, BorderKind};
pub use color::{ColorBase, ColorExpr, ColorModifier, Rgba};
pub use geometry::{Scalar, Spacing, Unit};
pub use layout::{Display, Dock, Overflow, ScrollbarGutter, Visibility};
pub use text::{AlignHorizontal, AlignVertical, TextAlign, TextStyle};

/// The final property values for one node at one point in time.
///
/// Fully determined by the loaded rule index plus the node's state
/// snapshot and ancestor chain. Unset properties keep their component
/// defaults; the cascade never inherits from ancestor computed styles.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    // Colors
    pub color: Option<Rgba>,
    pub background: Option<Rgba>,
    pub tint: Option<Rgba>,

    // Dimensions
    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
    pub min_width: Option<Scalar>,
    pub max_width: Option<Scalar>,
    pub min_height: Option<Scalar>,
    pub max_height: Option<Scalar>,

    // Box model
    pub margin: Spacing,
    pub padding: Spacing,
    pub border: Border,

    // Text and alignment
    pub text_style: TextStyle,
    pub text_align: TextAlign,
    pub align_horizontal: AlignHorizontal,
    pub align_vertical: AlignVertical,
    pub content_align_horizontal: AlignHorizontal,
    pub content_align_vertical: AlignVertical,

    // Display
    pub display: Display,
    pub visibility: Visibility,
    pub opacity: f64,

    // Scrolling
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub scrollbar_gutter: ScrollbarGutter,

    // Placement
    pub dock: Option<Dock>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: None,
            background: None,
            tint: None,
            width: None,
            height: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            margin: Spacing::default(),
            padding: Spacing::default(),
            border: Border::default(),
            text_style: TextStyle::default(),
            text_align: TextAlign::default(),
            align_horizontal: AlignHorizontal::default(),
            align_vertical: AlignVertical::default(),
            content_align_horizontal: AlignHorizontal::default(),
            content_align_vertical: AlignVertical::default(),
            display: Display::default(),
            visibility: Visibility::default(),
            opacity: 1.0,
            overflow_x: Overflow::default(),
            overflow_y: Overflow::default(),
            scrollbar_gutter: ScrollbarGutter::default(),
            dock: None,
        }
    }
}
