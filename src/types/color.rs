//! Color values and lazily evaluated color expressions.
//!
//! Stylesheets can name colors directly (`#ff0000`, `rgb(255, 0, 0)`,
//! `hsl(0, 100%, 50%)`, `cyan`) or refer to variables (`$primary`) with
//! optional derivation suffixes (`$primary-lighten-1`) and alpha
//! percentages (`$primary 50%`). Literal colors parse to [`Rgba`]
//! immediately; variable references are kept symbolic in a [`ColorExpr`]
//! and evaluated against the variable table during the cascade.

use std::fmt;

/// Error returned when a color literal fails to parse.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorParseError {
    pub message: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ColorParseError {}

/// A concrete RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 1.0,
        }
    }
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// A fully transparent color.
    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Returns a copy with the given alpha.
    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Raises luminosity by 10% per step, clamped to white.
    pub fn lighten(&self, steps: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l + steps * 0.1).clamp(0.0, 1.0), self.a)
    }

    /// Lowers luminosity by 10% per step, clamped to black.
    pub fn darken(&self, steps: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l - steps * 0.1).clamp(0.0, 1.0), self.a)
    }

    /// Parse a color literal.
    ///
    /// Supported formats:
    /// - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
    /// - Functions: `rgb(r, g, b[, a])`, `hsl(h, s%, l%[, a])`
    /// - Named CSS colors: `red`, `cyan`, `hotpink`, ...
    /// - `transparent`
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError {
                message: "empty color value".to_string(),
            });
        }

        let lower = input.to_lowercase();
        if lower == "transparent" {
            return Ok(Self::transparent());
        }

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if lower.starts_with("rgb") {
            return Self::parse_rgb_func(&lower);
        }
        if lower.starts_with("hsl") {
            return Self::parse_hsl_func(&lower);
        }

        named_color(&lower).ok_or_else(|| ColorParseError {
            message: format!("unknown color name: {input}"),
        })
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let chars: Vec<char> = hex.to_lowercase().chars().collect();
        match chars.len() {
            3 => Ok(Self::rgb(
                Self::hex_digit(chars[0])? * 17,
                Self::hex_digit(chars[1])? * 17,
                Self::hex_digit(chars[2])? * 17,
            )),
            4 => Ok(Self::rgba(
                Self::hex_digit(chars[0])? * 17,
                Self::hex_digit(chars[1])? * 17,
                Self::hex_digit(chars[2])? * 17,
                (Self::hex_digit(chars[3])? * 17) as f32 / 255.0,
            )),
            6 => Ok(Self::rgb(
                Self::hex_pair(chars[0], chars[1])?,
                Self::hex_pair(chars[2], chars[3])?,
                Self::hex_pair(chars[4], chars[5])?,
            )),
            8 => Ok(Self::rgba(
                Self::hex_pair(chars[0], chars[1])?,
                Self::hex_pair(chars[2], chars[3])?,
                Self::hex_pair(chars[4], chars[5])?,
                Self::hex_pair(chars[6], chars[7])? as f32 / 255.0,
            )),
            n => Err(ColorParseError {
                message: format!("invalid hex color length: {n}"),
            }),
        }
    }

    fn hex_digit(c: char) -> Result<u8, ColorParseError> {
        match c {
            '0'..='9' => Ok(c as u8 - b'0'),
            'a'..='f' => Ok(c as u8 - b'a' + 10),
            _ => Err(ColorParseError {
                message: format!("invalid hex digit: {c}"),
            }),
        }
    }

    fn hex_pair(c1: char, c2: char) -> Result<u8, ColorParseError> {
        Ok(Self::hex_digit(c1)? * 16 + Self::hex_digit(c2)?)
    }

    fn parse_rgb_func(input: &str) -> Result<Self, ColorParseError> {
        let parts = func_args(input)?;
        if parts.len() < 3 {
            return Err(ColorParseError {
                message: "rgb() requires at least 3 components".to_string(),
            });
        }
        let r = parse_u8(&parts[0])?;
        let g = parse_u8(&parts[1])?;
        let b = parse_u8(&parts[2])?;
        let a = if parts.len() >= 4 {
            parse_f32(&parts[3])?
        } else {
            1.0
        };
        Ok(Self::rgba(r, g, b, a))
    }

    fn parse_hsl_func(input: &str) -> Result<Self, ColorParseError> {
        let parts = func_args(input)?;
        if parts.len() < 3 {
            return Err(ColorParseError {
                message: "hsl() requires at least 3 components".to_string(),
            });
        }
        let h: f32 = parts[0].parse().map_err(|_| ColorParseError {
            message: format!("invalid hue: {}", parts[0]),
        })?;
        let s = parse_percent(&parts[1])?;
        let l = parse_percent(&parts[2])?;
        let a = if parts.len() >= 4 {
            parse_f32(&parts[3])?
        } else {
            1.0
        };
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Ok(Self::rgba(r, g, b, a))
    }

    fn to_hsl(&self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f32::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if (max - r).abs() < f32::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f32::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s, l)
    }

    fn from_hsl(h: f32, s: f32, l: f32, a: f32) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self::rgba(r, g, b, a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < f32::EPSILON {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r,
                self.g,
                self.b,
                (self.a * 255.0).round() as u8
            )
        }
    }
}

fn func_args(input: &str) -> Result<Vec<String>, ColorParseError> {
    let start = input.find('(').ok_or_else(|| ColorParseError {
        message: "missing '(' in color function".to_string(),
    })?;
    let end = input.find(')').ok_or_else(|| ColorParseError {
        message: "missing ')' in color function".to_string(),
    })?;
    Ok(input[start + 1..end]
        .split(',')
        .map(|s| s.trim().to_string())
        .collect())
}

fn parse_u8(s: &str) -> Result<u8, ColorParseError> {
    let val: i32 = s.parse().map_err(|_| ColorParseError {
        message: format!("invalid number: {s}"),
    })?;
    if !(0..=255).contains(&val) {
        return Err(ColorParseError {
            message: format!("component out of range (0-255): {val}"),
        });
    }
    Ok(val as u8)
}

fn parse_f32(s: &str) -> Result<f32, ColorParseError> {
    s.parse().map_err(|_| ColorParseError {
        message: format!("invalid alpha: {s}"),
    })
}

fn parse_percent(s: &str) -> Result<f32, ColorParseError> {
    let s = s.strip_suffix('%').unwrap_or(s);
    let val: f32 = s.parse().map_err(|_| ColorParseError {
        message: format!("invalid percentage: {s}"),
    })?;
    Ok(val / 100.0)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if s <= 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = (h.rem_euclid(360.0)) / 360.0;

    let hue = |mut t: f32| -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    (
        (hue(h + 1.0 / 3.0) * 255.0).round() as u8,
        (hue(h) * 255.0).round() as u8,
        (hue(h - 1.0 / 3.0) * 255.0).round() as u8,
    )
}

fn named_color(name: &str) -> Option<Rgba> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "dimgray" | "dimgrey" => (105, 105, 105),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "darkorange" => (255, 140, 0),
        "gold" => (255, 215, 0),
        "pink" => (255, 192, 203),
        "hotpink" => (255, 105, 180),
        "deeppink" => (255, 20, 147),
        "crimson" => (220, 20, 60),
        "salmon" => (250, 128, 114),
        "coral" => (255, 127, 80),
        "tomato" => (255, 99, 71),
        "brown" => (165, 42, 42),
        "chocolate" => (210, 105, 30),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "orchid" => (218, 112, 214),
        "plum" => (221, 160, 221),
        "khaki" => (240, 230, 140),
        "beige" => (245, 245, 220),
        "ivory" => (255, 255, 240),
        "skyblue" => (135, 206, 235),
        "deepskyblue" => (0, 191, 255),
        "dodgerblue" => (30, 144, 255),
        "royalblue" => (65, 105, 225),
        "steelblue" => (70, 130, 180),
        "slateblue" => (106, 90, 205),
        "midnightblue" => (25, 25, 112),
        "cornflowerblue" => (100, 149, 237),
        "turquoise" => (64, 224, 208),
        "aquamarine" => (127, 255, 212),
        "springgreen" => (0, 255, 127),
        "seagreen" => (46, 139, 87),
        "forestgreen" => (34, 139, 34),
        "darkgreen" => (0, 100, 0),
        "limegreen" => (50, 205, 50),
        "greenyellow" => (173, 255, 47),
        "olivedrab" => (107, 142, 35),
        "darkred" => (139, 0, 0),
        "darkblue" => (0, 0, 139),
        "darkcyan" => (0, 139, 139),
        "darkmagenta" => (139, 0, 139),
        "darkviolet" => (148, 0, 211),
        "darkslategray" | "darkslategrey" => (47, 79, 79),
        "slategray" | "slategrey" => (112, 128, 144),
        "lightslategray" | "lightslategrey" => (119, 136, 153),
        "gainsboro" => (220, 220, 220),
        "whitesmoke" => (245, 245, 245),
        "honeydew" => (240, 255, 240),
        "lavender" => (230, 230, 250),
        "rebeccapurple" => (102, 51, 153),
        "tan" => (210, 180, 140),
        "wheat" => (245, 222, 179),
        "sienna" => (160, 82, 45),
        "peru" => (205, 133, 63),
        _ => return None,
    };
    Some(Rgba::rgb(r, g, b))
}

/// A derivation applied to a base color at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorModifier {
    /// Raise luminosity by N steps (10% each).
    Lighten(f32),
    /// Lower luminosity by N steps (10% each).
    Darken(f32),
    /// Replace alpha with the given fraction (0.0-1.0).
    Alpha(f32),
}

/// The base of a color expression: a literal or a variable reference.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorBase {
    Literal(Rgba),
    /// A `$name` reference, resolved against the variable table when the
    /// cascade evaluates the expression.
    Var(String),
}

/// A color value as written in a declaration.
///
/// Modifiers are chained onto the base and applied in order, so
/// `$primary-darken-2 30%` is `Var("primary")` + `[Darken(2), Alpha(0.3)]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorExpr {
    pub base: ColorBase,
    pub modifiers: Vec<ColorModifier>,
}

impl ColorExpr {
    pub fn literal(color: Rgba) -> Self {
        Self {
            base: ColorBase::Literal(color),
            modifiers: Vec::new(),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self {
            base: ColorBase::Var(name.into()),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: ColorModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// The variable this expression depends on, if any.
    pub fn var_name(&self) -> Option<&str> {
        match &self.base {
            ColorBase::Var(name) => Some(name),
            ColorBase::Literal(_) => None,
        }
    }

    /// Applies the modifier chain to an already-resolved base color.
    pub fn apply_modifiers(&self, base: Rgba) -> Rgba {
        self.modifiers
            .iter()
            .fold(base, |color, modifier| match modifier {
                ColorModifier::Lighten(steps) => color.lighten(*steps),
                ColorModifier::Darken(steps) => color.darken(*steps),
                ColorModifier::Alpha(alpha) => color.with_alpha(*alpha),
            })
    }
}

impl fmt::Display for ColorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            ColorBase::Literal(color) => write!(f, "{color}")?,
            ColorBase::Var(name) => write!(f, "${name}")?,
        }
        for modifier in &self.modifiers {
            match modifier {
                ColorModifier::Lighten(n) => write!(f, "-lighten-{n}")?,
                ColorModifier::Darken(n) => write!(f, "-darken-{n}")?,
                ColorModifier::Alpha(a) => write!(f, " {}%", (a * 100.0).round())?,
            }
        }
        Ok(())
    }
}
