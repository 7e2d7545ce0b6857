//! Variable extraction and resolution.
//!
//! Variables use `$name: value;` definitions at the top level of a sheet
//! and are visible to every rule regardless of declaration order (the
//! table is built in a first pass over the source). Values may reference
//! other variables, including derived color forms like
//! `$primary-lighten-1`; resolution rejects cycles and undefined names so
//! a successfully built table is total.
//!
//! Color-valued variables stay symbolic in declarations and are looked up
//! when the cascade evaluates a [`ColorExpr`]; every other variable is
//! expanded textually before rule parsing.

use std::collections::HashMap;

use crate::error::StyleError;
use crate::parser::values::parse_color_expr;
use crate::types::color::{ColorBase, ColorExpr, ColorModifier, Rgba};

/// Replaces `/* ... */` comments with spaces, preserving newlines so
/// error line numbers stay accurate.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            out.push_str("  ");
            while let Some(inner) = chars.next() {
                if inner == '\n' {
                    out.push('\n');
                } else if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    break;
                } else {
                    out.push(' ');
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits a derived color reference like `primary-lighten-1` into its
/// base name and modifier. Returns `None` when the name has no
/// `-lighten-N` / `-darken-N` suffix.
pub fn split_modifier(name: &str) -> Option<(&str, ColorModifier)> {
    let parts: Vec<&str> = name.rsplitn(3, '-').collect();
    if parts.len() < 3 {
        return None;
    }
    let steps: f32 = parts[0].parse().ok()?;
    match parts[1] {
        "lighten" => Some((parts[2], ColorModifier::Lighten(steps))),
        "darken" => Some((parts[2], ColorModifier::Darken(steps))),
        _ => None,
    }
}

/// The resolved `$name -> value` table for one loaded sheet.
///
/// Immutable once built; a sheet reload builds a fresh table.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    /// Fully resolved textual values, variable-free.
    resolved: HashMap<String, String>,
    /// The subset of variables whose value is a color.
    colors: HashMap<String, Rgba>,
}

impl VariableTable {
    /// Extracts definitions from (comment-stripped) source and resolves
    /// every value, failing on cycles and undefined references.
    pub fn build(source: &str) -> Result<Self, StyleError> {
        let raw = extract_definitions(source);

        let mut table = Self::default();
        let mut stack = Vec::new();
        for name in raw.keys() {
            resolve_name(&raw, name, &mut stack, &mut table.resolved)?;
        }

        // Classify: values that parse wholly as a variable-free color
        // expression are color variables.
        for (name, value) in &table.resolved {
            if let Ok((rest, expr)) = parse_color_expr(value) {
                if rest.trim().is_empty() {
                    if let ColorBase::Literal(base) = &expr.base {
                        table.colors.insert(name.clone(), expr.apply_modifiers(*base));
                    }
                }
            }
        }

        Ok(table)
    }

    /// The resolved textual value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.resolved.get(name).map(String::as_str)
    }

    /// The concrete color of a color-valued variable.
    pub fn get_color(&self, name: &str) -> Option<Rgba> {
        self.colors.get(name).copied()
    }

    pub fn is_color(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Evaluates a color expression to a concrete color.
    ///
    /// Called during the cascade; references are guaranteed resolvable by
    /// load-time validation, so a missing name (stale expression from a
    /// previous sheet) falls back to white rather than failing.
    pub fn eval_color(&self, expr: &ColorExpr) -> Rgba {
        let base = match &expr.base {
            ColorBase::Literal(color) => *color,
            ColorBase::Var(name) => self.get_color(name).unwrap_or_else(Rgba::white),
        };
        expr.apply_modifiers(base)
    }

    /// Rewrites a parsed color expression so derived references point at
    /// their base variable (`$primary-lighten-1` becomes `$primary` plus a
    /// `Lighten(1)` modifier), and validates that the reference exists.
    pub fn normalize_color_expr(&self, expr: &mut ColorExpr) -> Result<(), StyleError> {
        let ColorBase::Var(name) = &expr.base else {
            return Ok(());
        };

        if self.is_color(name) {
            return Ok(());
        }

        if let Some((base, modifier)) = split_modifier(name) {
            if self.is_color(base) {
                expr.base = ColorBase::Var(base.to_string());
                // Derivation applies before any alpha suffix.
                expr.modifiers.insert(0, modifier);
                return Ok(());
            }
        }

        Err(StyleError::UnknownVariable { name: name.clone() })
    }

    /// Expands non-color variable references in rule source text.
    ///
    /// Definition lines are blanked (newline kept); color references are
    /// left for the color parser to capture symbolically; anything
    /// undefined aborts the load.
    pub fn expand_source(&self, source: &str) -> Result<String, StyleError> {
        let mut output = String::with_capacity(source.len());

        for line in source.lines() {
            if line.trim_start().starts_with('$') {
                output.push('\n');
                continue;
            }

            let mut chars = line.chars().peekable();
            while let Some(c) = chars.next() {
                if c != '$' {
                    output.push(c);
                    continue;
                }

                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '-' || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if self.is_color(&name) {
                    output.push('$');
                    output.push_str(&name);
                } else if let Some((base, _)) = split_modifier(&name) {
                    if self.is_color(base) {
                        output.push('$');
                        output.push_str(&name);
                    } else {
                        return Err(StyleError::UnknownVariable { name });
                    }
                } else if let Some(value) = self.get(&name) {
                    output.push_str(value);
                } else {
                    return Err(StyleError::UnknownVariable { name });
                }
            }
            output.push('\n');
        }

        Ok(output)
    }
}

/// Collects raw `$name: value;` definitions, one per line.
fn extract_definitions(source: &str) -> HashMap<String, String> {
    let mut raw = HashMap::new();
    for line in source.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('$') else {
            continue;
        };
        let Some(colon_idx) = rest.find(':') else {
            continue;
        };
        let name = rest[..colon_idx].trim().to_string();
        let value = rest[colon_idx + 1..]
            .trim()
            .trim_end_matches(';')
            .trim()
            .to_string();
        if !name.is_empty() {
            raw.insert(name, value);
        }
    }
    raw
}

/// Resolves one variable's value, recursing into references. `stack`
/// carries the active resolution chain for cycle reporting.
fn resolve_name(
    raw: &HashMap<String, String>,
    name: &str,
    stack: &mut Vec<String>,
    resolved: &mut HashMap<String, String>,
) -> Result<String, StyleError> {
    if let Some(value) = resolved.get(name) {
        return Ok(value.clone());
    }

    if let Some(pos) = stack.iter().position(|n| n == name) {
        let mut chain: Vec<String> = stack[pos..].to_vec();
        chain.push(name.to_string());
        return Err(StyleError::CyclicVariable { chain });
    }

    let Some(value) = raw.get(name) else {
        return Err(StyleError::UnknownVariable {
            name: name.to_string(),
        });
    };

    stack.push(name.to_string());
    let result = resolve_value(raw, value, stack, resolved);
    stack.pop();

    let value = result?;
    resolved.insert(name.to_string(), value.clone());
    Ok(value)
}

/// Substitutes `$ref` occurrences inside one value string.
fn resolve_value(
    raw: &HashMap<String, String>,
    value: &str,
    stack: &mut Vec<String>,
    resolved: &mut HashMap<String, String>,
) -> Result<String, StyleError> {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            output.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '-' || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if raw.contains_key(&name) {
            output.push_str(&resolve_name(raw, &name, stack, resolved)?);
        } else if let Some((base, modifier)) = split_modifier(&name) {
            // Derived reference to another variable: resolve the base,
            // require it to be a color, and bake the derivation in.
            let base_value = resolve_name(raw, base, stack, resolved)?;
            let color = parse_resolved_color(&base_value).ok_or_else(|| {
                StyleError::UnknownVariable { name: name.clone() }
            })?;
            let derived = match modifier {
                ColorModifier::Lighten(n) => color.lighten(n),
                ColorModifier::Darken(n) => color.darken(n),
                ColorModifier::Alpha(a) => color.with_alpha(a),
            };
            output.push_str(&derived.to_string());
        } else {
            return Err(StyleError::UnknownVariable { name });
        }
    }

    Ok(output)
}

fn parse_resolved_color(value: &str) -> Option<Rgba> {
    let (rest, expr) = parse_color_expr(value).ok()?;
    if !rest.trim().is_empty() {
        return None;
    }
    match &expr.base {
        ColorBase::Literal(base) => Some(expr.apply_modifiers(*base)),
        ColorBase::Var(_) => None,
    }
}
