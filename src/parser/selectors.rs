//! Selector parsing: simple selectors, compounds, and combinator chains.

use crate::parser::values::parse_ident;
use crate::parser::{Combinator, ComplexSelector, CompoundSelector, Selector, SelectorPart};
use crate::parser::stylesheet::PseudoClass;
use nom::{
    IResult,
    branch::alt,
    character::complete::{char, multispace0},
    combinator::{map, map_opt},
    multi::many0,
    sequence::preceded,
};

/// Parses one simple selector: `Type`, `.class`, `#id`, `:pseudo`, `&`, `*`.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        // Unknown pseudo-class names are a syntax error, not a
        // never-matching selector.
        map_opt(preceded(char(':'), parse_ident), |s| {
            PseudoClass::from_name(s).map(Selector::PseudoClass)
        }),
        map(char('&'), |_| Selector::Parent),
        map(char('*'), |_| Selector::Universal),
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g. `Button.primary:hover`). Simple
/// selectors chain without intervening whitespace.
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a complex selector with combinators (e.g. `Screen > Button Label`).
///
/// An explicit `>` is the child combinator; bare whitespace between
/// compounds is the descendant combinator. The rightmost part always
/// carries [`Combinator::None`].
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let (rem, ws) = multispace0(input)?;

        if let Ok((after_op, _)) = char::<_, nom::error::Error<&str>>('>')(rem) {
            let (after_ws, _) = multispace0(after_op)?;
            let (next_input, next) = parse_compound_selector(after_ws)?;
            parts.push(SelectorPart::new(current, Combinator::Child));
            current = next;
            input = next_input;
            continue;
        }

        if !ws.is_empty() {
            // Whitespace may be a descendant combinator or just the gap
            // before `{` or `,`; only commit when another compound follows.
            if let Ok((next_input, next)) = parse_compound_selector(rem) {
                parts.push(SelectorPart::new(current, Combinator::Descendant));
                current = next;
                input = next_input;
                continue;
            }
        }

        break;
    }

    parts.push(SelectorPart::new(current, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}
