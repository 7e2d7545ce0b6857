//! # tuicss - Terminal UI Style Resolution
//!
//! A style resolution engine for terminal user interfaces, built around a
//! CSS-like dialect with cell-based units, theme variables, nested rules,
//! and interaction pseudo-classes. This crate provides:
//!
//! - **Parsing**: Convert stylesheet source text into a flat, indexed
//!   [`StyleSheet`](parser::StyleSheet), with variable resolution and
//!   rule-nesting expansion done at load time
//! - **Cascade**: Match selectors against widget snapshots and fold the
//!   winning declarations into a [`ComputedStyle`] by specificity and
//!   source order
//! - **Engine**: A [`StyleEngine`] that caches per-node results and
//!   invalidates only what a state or tree change can actually affect
//!
//! ## Quick Start
//!
//! ```rust
//! use tuicss::{NodeId, NodeState, StateFlags, StyleEngine};
//!
//! let mut engine = StyleEngine::new();
//! engine
//!     .load_sheet(
//!         r#"
//!         $primary: #0178d4;
//!
//!         Button {
//!             background: $primary;
//!             padding: 1 2;
//!
//!             &:hover {
//!                 background: $primary-lighten-1;
//!             }
//!         }
//!         "#,
//!     )
//!     .expect("valid stylesheet");
//!
//! let button = NodeState::new(NodeId(1), "Button").with_states(StateFlags::HOVER);
//! let style = engine.resolve(&button, &[]);
//! assert!(style.background.is_some());
//! ```
//!
//! ## Supported Features
//!
//! ### Selectors
//! - Type selectors: `Button`, `Label`, `DataTable`
//! - Class selectors: `.primary`, `.datatable--cursor`
//! - ID selectors: `#sidebar`, `#run-button`
//! - Universal selector: `*`
//! - Compound selectors: `Button.primary#submit`
//! - Descendant combinator: `Container Button`
//! - Child combinator: `Container > Button`
//! - Nesting with `&`: `&.primary`, `&:hover`, and bare nested rules
//!
//! ### Variables
//! - Definitions at top level: `$primary: #0178d4;`
//! - References in any value position: `border: tall $primary;`
//! - Derived colors: `$primary-lighten-2`, `$accent-darken-1`
//! - Unknown references and definition cycles are load-time errors
//!
//! ### Pseudo-classes
//! - `:focus` / `:blur` - keyboard focus and its absence
//! - `:hover` - pointer over the widget
//! - `:active` - widget being pressed
//! - `:disabled` - widget not interactive
//! - `:focus-within` - focus somewhere inside the widget
//!
//! ## Modules
//!
//! - [`parser`]: stylesheet parsing, variables, and nesting expansion
//! - [`cascade`]: selector matching and style computation
//! - [`index`]: selector index for candidate-rule lookup
//! - [`engine`]: cached resolution and invalidation
//! - [`types`]: colors, geometry, borders, and layout property types
//! - [`error`]: load-time error types

pub mod cascade;
pub mod engine;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use cascade::{NodeId, NodeState, StateFlags};
pub use engine::{StyleEngine, TreeChange};
pub use error::StyleError;
pub use parser::{StyleSheet, parse_stylesheet};
pub use types::ComputedStyle;
