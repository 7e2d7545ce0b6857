//! Stylesheet parsing.
//!
//! [`parse_stylesheet`] is the entry point. The pipeline:
//!
//! 1. strip `/* */` comments (newlines preserved for error reporting),
//! 2. build and resolve the [`VariableTable`](variables::VariableTable)
//!    from `$name: value;` definitions (order-independent, cycle-checked),
//! 3. expand non-color variable references into the rule text,
//! 4. parse rules, including `&`-nested blocks,
//! 5. flatten nesting into independent top-level rules,
//! 6. normalize and validate the color variable references that stayed
//!    symbolic for lazy evaluation.
//!
//! Any failure aborts the whole load; there is no partially parsed sheet.
//!
//! ## Submodules
//!
//! - [`selectors`]: selector grammar
//! - [`stylesheet`]: AST types
//! - [`flatten`]: `&`-nesting flattening
//! - [`variables`]: variable table construction
//! - [`values`] / [`units`]: property value grammars

pub mod flatten;
pub mod selectors;
pub mod stylesheet;
pub mod units;
pub mod values;
pub mod variables;

pub use crate::parser::flatten::flatten_stylesheet;
pub use crate::parser::stylesheet::{
    Combinator, ComplexSelector, CompoundSelector, Declaration, PseudoClass, Rule, RuleItem,
    Selector, SelectorList, SelectorPart, Specificity, StyleRule, StyleSheet,
};
pub use crate::parser::variables::VariableTable;

use crate::error::StyleError;
use crate::parser::selectors::parse_complex_selector;
use crate::parser::values::parse_ident;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::{
    IResult,
    character::complete::{char, multispace0},
    combinator::{cut, map, opt},
    multi::many0,
    sequence::{preceded, tuple},
};

/// Parses a full stylesheet, including variable resolution and nesting.
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet, StyleError> {
    let clean = variables::strip_comments(source);
    let vars = VariableTable::build(&clean)?;
    let expanded = vars.expand_source(&clean)?;

    let (remaining, raw_rules) = many0(parse_rule)(expanded.as_str())
        .map_err(|e| syntax_error(&expanded, &e))?;

    if !remaining.trim().is_empty() {
        return Err(StyleError::Parse {
            line: line_of(&expanded, remaining),
            message: format!(
                "unexpected tokens: {}",
                remaining.trim().lines().next().unwrap_or_default()
            ),
        });
    }

    let mut sheet = flatten_stylesheet(raw_rules);

    // Validate lazily evaluated color references against the table and
    // normalize derivation suffixes onto base variables.
    for rule in &mut sheet.rules {
        for declaration in &mut rule.declarations {
            for expr in declaration.color_exprs_mut() {
                vars.normalize_color_expr(expr)?;
            }
        }
    }

    sheet.variables = vars;
    Ok(sheet)
}

/// 1-based line number of `rest` within `full`.
fn line_of(full: &str, rest: &str) -> u32 {
    let consumed = full.len().saturating_sub(rest.len());
    full[..consumed].matches('\n').count() as u32 + 1
}

fn syntax_error(source: &str, error: &nom::Err<nom::error::Error<&str>>) -> StyleError {
    let (line, message) = match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => (
            line_of(source, e.input),
            format!("{:?}", e.code),
        ),
        nom::Err::Incomplete(_) => (1, "incomplete input".to_string()),
    };
    StyleError::Parse { line, message }
}

/// Parses one rule: a selector list followed by a `{}` block.
///
/// Once the opening brace is consumed the rule is committed: a malformed
/// declaration raises `nom::Err::Failure` at the offending position
/// instead of backtracking, so error line numbers point into the block
/// rather than at the end of the previous rule.
pub fn parse_rule(input: &str) -> IResult<&str, Rule> {
    let (input, _) = multispace0(input)?;
    let (input, selectors) = parse_selector_list(input)?;
    let (input, _) = multispace0(input)?;

    let (input, _) = char('{')(input)?;
    let (input, items) = parse_rule_items(input)?;
    let (input, _) = cut(preceded(multispace0, char('}')))(input)?;

    Ok((input, Rule::new(selectors, items)))
}

/// Parses block contents: declarations interleaved with nested rules.
fn parse_rule_items(input: &str) -> IResult<&str, Vec<RuleItem>> {
    many0(alt((
        map(parse_rule, RuleItem::NestedRule),
        map(parse_declaration, RuleItem::Declaration),
    )))(input)
}

/// Parses a comma-separated selector group.
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_complex_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_complex_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

/// Parses a single declaration, dispatching on the property name.
fn parse_declaration(input: &str) -> IResult<&str, Declaration> {
    let (input, _) = multispace0(input)?;
    let (input, property) = parse_ident(input)?;
    let (input, _) = tuple((multispace0, char(':'), multispace0))(input)?;

    let (input, declaration) = match property {
        "color" => map(values::parse_color_expr, Declaration::Color)(input)?,
        "background" => map(values::parse_color_expr, Declaration::Background)(input)?,
        "tint" => map(values::parse_color_expr, Declaration::Tint)(input)?,
        "width" => map(units::parse_scalar, Declaration::Width)(input)?,
        "height" => map(units::parse_scalar, Declaration::Height)(input)?,
        "min-width" => map(units::parse_scalar, Declaration::MinWidth)(input)?,
        "max-width" => map(units::parse_scalar, Declaration::MaxWidth)(input)?,
        "min-height" => map(units::parse_scalar, Declaration::MinHeight)(input)?,
        "max-height" => map(units::parse_scalar, Declaration::MaxHeight)(input)?,
        "margin" => map(units::parse_spacing, Declaration::Margin)(input)?,
        "margin-top" => map(units::parse_scalar, Declaration::MarginTop)(input)?,
        "margin-right" => map(units::parse_scalar, Declaration::MarginRight)(input)?,
        "margin-bottom" => map(units::parse_scalar, Declaration::MarginBottom)(input)?,
        "margin-left" => map(units::parse_scalar, Declaration::MarginLeft)(input)?,
        "padding" => map(units::parse_spacing, Declaration::Padding)(input)?,
        "padding-top" => map(units::parse_scalar, Declaration::PaddingTop)(input)?,
        "padding-right" => map(units::parse_scalar, Declaration::PaddingRight)(input)?,
        "padding-bottom" => map(units::parse_scalar, Declaration::PaddingBottom)(input)?,
        "padding-left" => map(units::parse_scalar, Declaration::PaddingLeft)(input)?,
        "border" => map(values::parse_border_edge, Declaration::Border)(input)?,
        "border-top" => map(values::parse_border_edge, Declaration::BorderTop)(input)?,
        "border-right" => map(values::parse_border_edge, Declaration::BorderRight)(input)?,
        "border-bottom" => map(values::parse_border_edge, Declaration::BorderBottom)(input)?,
        "border-left" => map(values::parse_border_edge, Declaration::BorderLeft)(input)?,
        "text-style" => map(values::parse_text_style, Declaration::TextStyleDecl)(input)?,
        "text-align" => map(values::parse_text_align, Declaration::TextAlign)(input)?,
        "align" => {
            let (input, (h, v)) = values::parse_align_pair(input)?;
            (input, Declaration::Align(h, v))
        }
        "align-horizontal" => {
            map(values::parse_align_horizontal, Declaration::AlignHorizontal)(input)?
        }
        "align-vertical" => {
            map(values::parse_align_vertical, Declaration::AlignVertical)(input)?
        }
        "content-align" => {
            let (input, (h, v)) = values::parse_align_pair(input)?;
            (input, Declaration::ContentAlign(h, v))
        }
        "content-align-horizontal" => map(
            values::parse_align_horizontal,
            Declaration::ContentAlignHorizontal,
        )(input)?,
        "content-align-vertical" => map(
            values::parse_align_vertical,
            Declaration::ContentAlignVertical,
        )(input)?,
        "display" => map(values::parse_display, Declaration::Display)(input)?,
        "visibility" => map(values::parse_visibility, Declaration::Visibility)(input)?,
        "opacity" => map(values::parse_opacity, Declaration::Opacity)(input)?,
        "overflow" => {
            let (input, (x, y)) = values::parse_overflow_shorthand(input)?;
            (input, Declaration::Overflow(x, y))
        }
        "overflow-x" => map(values::parse_overflow, Declaration::OverflowX)(input)?,
        "overflow-y" => map(values::parse_overflow, Declaration::OverflowY)(input)?,
        "dock" => map(values::parse_dock, Declaration::Dock)(input)?,
        "scrollbar-gutter" => {
            map(values::parse_scrollbar_gutter, Declaration::ScrollbarGutter)(input)?
        }
        _ => {
            // Unknown properties are consumed and ignored by the cascade.
            let (input, _value) = take_until_semicolon_or_brace(input)?;
            (input, Declaration::Unknown(property.to_string()))
        }
    };

    // `!important` is accepted and ignored.
    let (input, _) = opt(preceded(multispace0, tag("!important")))(input)?;

    let (input, _) = multispace0(input)?;
    let (input, _) = opt(char(';'))(input)?;
    Ok((input, declaration))
}

fn take_until_semicolon_or_brace(input: &str) -> IResult<&str, &str> {
    let end = input
        .find(|c: char| c == ';' || c == '}')
        .ok_or_else(|| {
            nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Eof))
        })?;
    Ok((&input[end..], &input[..end]))
}
