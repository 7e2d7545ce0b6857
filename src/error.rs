//! Errors surfaced while loading a stylesheet.
//!
//! All variants abort the load; the engine keeps the previously loaded
//! sheet active. Resolution itself never fails; nodes no rule matches
//! simply receive component defaults.

use thiserror::Error;

/// Errors that can occur while parsing and loading a stylesheet.
#[derive(Error, Debug)]
pub enum StyleError {
    /// Malformed stylesheet syntax. `line` is 1-based.
    #[error("stylesheet syntax error at line {line}: {message}")]
    Parse { line: u32, message: String },

    /// A `$variable` reference with no definition in the sheet.
    #[error("unknown variable: ${name}")]
    UnknownVariable { name: String },

    /// Variable definitions reference each other in a cycle.
    #[error("cyclic variable definition: {}", chain.join(" -> "))]
    CyclicVariable { chain: Vec<String> },

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),
}
