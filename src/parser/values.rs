//! Property value parsing: colors, borders, text style, keywords.

use crate::types::border::{BorderEdgeExpr, BorderKind};
use crate::types::color::{ColorExpr, ColorModifier, Rgba};
use crate::types::layout::{Display, Dock, Overflow, ScrollbarGutter, Visibility};
use crate::types::text::{AlignHorizontal, AlignVertical, TextAlign, TextStyle};
use nom::{
    IResult,
    bytes::complete::take_while1,
    character::complete::multispace1,
    combinator::opt,
    sequence::preceded,
};

/// Parses a stylesheet identifier (alphanumerics, dashes, underscores).
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn value_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))
}

/// Parse a color value expression.
///
/// Handles literals (hex, rgb(), hsl(), named, transparent) and variable
/// references (`$primary`, `$primary-lighten-1`). A trailing percentage
/// (`$surface 50%`, `white 0%`) becomes an alpha modifier. Variable
/// references stay symbolic; derivation suffixes on them are normalized
/// against the variable table after parsing.
pub fn parse_color_expr(input: &str) -> IResult<&str, ColorExpr> {
    let input = input.trim_start();
    let end = find_color_end(input);
    if end == 0 {
        return Err(value_error(input));
    }

    let token = &input[..end];
    let remaining = &input[end..];

    let expr = if let Some(name) = token.strip_prefix('$') {
        if name.is_empty() {
            return Err(value_error(input));
        }
        ColorExpr::var(name)
    } else {
        match Rgba::parse(token) {
            Ok(color) => ColorExpr::literal(color),
            Err(_) => return Err(value_error(input)),
        }
    };

    let (remaining, expr) = parse_optional_alpha(remaining, expr);
    Ok((remaining, expr))
}

/// Parse an optional trailing alpha percentage (e.g. ` 40%`).
fn parse_optional_alpha(input: &str, expr: ColorExpr) -> (&str, ColorExpr) {
    let trimmed = input.trim_start();

    let mut end = 0;
    let mut found_digits = false;
    for (i, c) in trimmed.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            found_digits = true;
            end = i + c.len_utf8();
        } else if c == '%' && found_digits {
            if let Ok(percent) = trimmed[..end].parse::<f32>() {
                let expr = expr.with_modifier(ColorModifier::Alpha(percent / 100.0));
                return (&trimmed[end + 1..], expr);
            }
            break;
        } else {
            break;
        }
    }

    (input, expr)
}

/// Find the end of a color token, respecting parentheses so `rgb(0, 0, 0)`
/// is consumed whole.
fn find_color_end(input: &str) -> usize {
    let mut paren_depth = 0;
    let mut end = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' => {
                paren_depth -= 1;
                if paren_depth == 0 {
                    return i + 1;
                }
            }
            ';' | '}' if paren_depth == 0 => return i,
            c if c.is_whitespace() && paren_depth == 0 => return i,
            _ => {}
        }
        end = i + c.len_utf8();
    }
    end
}

/// Parse a border edge (e.g. `solid red`, `hkey $primary`, `blue wide`).
///
/// Accepts both `<kind> [<color>]` and `<color> <kind>` orders.
pub fn parse_border_edge(input: &str) -> IResult<&str, BorderEdgeExpr> {
    let input = input.trim_start();

    if let Ok((remaining, kind_str)) = parse_ident(input) {
        if let Some(kind) = BorderKind::from_keyword(kind_str) {
            let (remaining, color) = opt(preceded(multispace1, parse_color_expr))(remaining)?;
            return Ok((remaining, BorderEdgeExpr { kind, color }));
        }
    }

    // First token was not a border kind; try "<color> <kind>".
    let (input, color) = parse_color_expr(input)?;
    let input = input.trim_start();
    let (input, kind_str) = parse_ident(input)?;
    let kind = BorderKind::from_keyword(kind_str).ok_or_else(|| value_error(input))?;

    Ok((
        input,
        BorderEdgeExpr {
            kind,
            color: Some(color),
        },
    ))
}

/// Parse a text style: one or more space-separated keywords, or `none`.
pub fn parse_text_style(input: &str) -> IResult<&str, TextStyle> {
    let input = input.trim_start();

    let end = input
        .find(|c: char| c == ';' || c == '}')
        .unwrap_or(input.len());
    let value_str = input[..end].trim();
    if value_str.is_empty() {
        return Err(value_error(input));
    }

    let mut style = TextStyle::empty();
    for keyword in value_str.split_whitespace() {
        match TextStyle::from_keyword(keyword) {
            // `none` resets every flag set so far.
            Some(flag) if flag.is_empty() => style = TextStyle::empty(),
            Some(flag) => style |= flag,
            None => return Err(value_error(input)),
        }
    }

    Ok((&input[end..], style))
}

/// Parse text-alignment keywords.
pub fn parse_text_align(input: &str) -> IResult<&str, TextAlign> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "start" => Ok((input, TextAlign::Start)),
        "end" => Ok((input, TextAlign::End)),
        "left" => Ok((input, TextAlign::Left)),
        "center" => Ok((input, TextAlign::Center)),
        "right" => Ok((input, TextAlign::Right)),
        "justify" => Ok((input, TextAlign::Justify)),
        _ => Err(value_error(input)),
    }
}

/// Parse horizontal alignment: `left`, `center`, or `right`.
pub fn parse_align_horizontal(input: &str) -> IResult<&str, AlignHorizontal> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "left" => Ok((input, AlignHorizontal::Left)),
        "center" => Ok((input, AlignHorizontal::Center)),
        "right" => Ok((input, AlignHorizontal::Right)),
        _ => Err(value_error(input)),
    }
}

/// Parse vertical alignment: `top`, `middle`, or `bottom`.
pub fn parse_align_vertical(input: &str) -> IResult<&str, AlignVertical> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "top" => Ok((input, AlignVertical::Top)),
        "middle" => Ok((input, AlignVertical::Middle)),
        "bottom" => Ok((input, AlignVertical::Bottom)),
        _ => Err(value_error(input)),
    }
}

/// Parse the align shorthand: `<horizontal> <vertical>`.
pub fn parse_align_pair(input: &str) -> IResult<&str, (AlignHorizontal, AlignVertical)> {
    let (input, h) = parse_align_horizontal(input)?;
    let (input, _) = multispace1(input)?;
    let (input, v) = parse_align_vertical(input)?;
    Ok((input, (h, v)))
}

/// Parse display: `block` or `none`.
pub fn parse_display(input: &str) -> IResult<&str, Display> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "block" => Ok((input, Display::Block)),
        "none" => Ok((input, Display::None)),
        _ => Err(value_error(input)),
    }
}

/// Parse visibility: `visible` or `hidden`.
pub fn parse_visibility(input: &str) -> IResult<&str, Visibility> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "visible" => Ok((input, Visibility::Visible)),
        "hidden" => Ok((input, Visibility::Hidden)),
        _ => Err(value_error(input)),
    }
}

/// Parse overflow on one axis: `visible`, `hidden`, `scroll`, or `auto`.
pub fn parse_overflow(input: &str) -> IResult<&str, Overflow> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "visible" => Ok((input, Overflow::Visible)),
        "hidden" => Ok((input, Overflow::Hidden)),
        "scroll" => Ok((input, Overflow::Scroll)),
        "auto" => Ok((input, Overflow::Auto)),
        _ => Err(value_error(input)),
    }
}

/// Parse the overflow shorthand: `<x> [<y>]`.
pub fn parse_overflow_shorthand(input: &str) -> IResult<&str, (Overflow, Overflow)> {
    let (input, first) = parse_overflow(input)?;
    let (input, second) = opt(preceded(multispace1, parse_overflow))(input)?;
    Ok((input, (first, second.unwrap_or(first))))
}

/// Parse dock: `top`, `bottom`, `left`, or `right`.
pub fn parse_dock(input: &str) -> IResult<&str, Dock> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "top" => Ok((input, Dock::Top)),
        "bottom" => Ok((input, Dock::Bottom)),
        "left" => Ok((input, Dock::Left)),
        "right" => Ok((input, Dock::Right)),
        _ => Err(value_error(input)),
    }
}

/// Parse scrollbar-gutter: `auto` or `stable`.
pub fn parse_scrollbar_gutter(input: &str) -> IResult<&str, ScrollbarGutter> {
    let (input, ident) = parse_ident(input)?;
    match ident.to_lowercase().as_str() {
        "auto" => Ok((input, ScrollbarGutter::Auto)),
        "stable" => Ok((input, ScrollbarGutter::Stable)),
        _ => Err(value_error(input)),
    }
}

/// Parse an opacity value: `0.0`-`1.0` or `0%`-`100%`, clamped.
pub fn parse_opacity(input: &str) -> IResult<&str, f64> {
    use super::units;
    use crate::types::geometry::Unit;

    let input = input.trim_start();
    let (remaining, scalar) = units::parse_scalar(input)?;
    let value = if scalar.unit == Unit::Percent {
        scalar.value / 100.0
    } else {
        scalar.value
    };
    Ok((remaining, value.clamp(0.0, 1.0)))
}
