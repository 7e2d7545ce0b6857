use std::fmt;

/// Unit attached to a numeric dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Character cells (the default terminal unit).
    #[default]
    Cells,
    /// Percentage of the parent's dimension.
    Percent,
    /// Percentage of viewport width.
    ViewWidth,
    /// Percentage of viewport height.
    ViewHeight,
    /// Automatic sizing based on content.
    Auto,
}

/// A dimension value: a number plus a unit, or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalar {
    pub value: f64,
    pub unit: Unit,
}

impl Scalar {
    pub const AUTO: Self = Self {
        value: 0.0,
        unit: Unit::Auto,
    };
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: Unit::Cells,
    };

    pub fn cells(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Cells,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Auto => write!(f, "auto"),
            Unit::Cells => write!(f, "{}", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
            Unit::ViewWidth => write!(f, "{}vw", self.value),
            Unit::ViewHeight => write!(f, "{}vh", self.value),
        }
    }
}

/// Edge insets used for margin and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
    pub left: Scalar,
}

impl Spacing {
    pub fn all(value: Scalar) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn vertical_horizontal(vertical: Scalar, horizontal: Scalar) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.top, self.right, self.bottom, self.left
        )
    }
}
