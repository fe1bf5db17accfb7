//! # formula-rs: Formula core for feature-model analysis
//!
//! **`formula-rs`** provides the propositional building blocks used when analysing feature models:
//! indexed literal sets, variable maps, formula trees and equivalence-preserving tree simplifiers.
//!
//! ## Key Features
//!
//! - **Indexed Literals**: Variables are 1-indexed (reserving 0), and literals are signed integers, as in DIMACS.
//!   A [`VariableMap`][crate::variable_map::VariableMap] names them and [`adapt`][crate::assignment::adapt]
//!   moves literals between two maps.
//! - **Literal Sets**: [`BooleanAssignment`][crate::assignment::BooleanAssignment],
//!   [`BooleanClause`][crate::assignment::BooleanClause] and [`BooleanSolution`][crate::assignment::BooleanSolution]
//!   share the [`LiteralSet`][crate::assignment::LiteralSet] operations (simplify, adapt, variable-level filters, conversions).
//! - **Arena Trees**: Formulas are rewritten in a [`FormulaArena`][crate::arena::FormulaArena], addressed by
//!   lightweight [`Idx`][crate::arena::Idx] handles, with shared canonical `true`/`false` constants.
//! - **Simplifiers**: [`AndOrSimplifier`][crate::and_or::AndOrSimplifier] flattens nested conjunctions and
//!   disjunctions; [`CoreDeadSimplifier`][crate::core_dead::CoreDeadSimplifier] substitutes fixed variables
//!   and folds the constants away.
//!
//! ## Basic Usage
//!
//! ```rust
//! use formula_rs::core_dead::CoreDeadSimplifier;
//! use formula_rs::formula::Formula;
//! use formula_rs::value::ValueAssignment;
//!
//! // f = (a & x) | (b => y)
//! let f = Formula::or([
//!     Formula::and([Formula::pos("a"), Formula::pos("x")]),
//!     Formula::implies(Formula::pos("b"), Formula::pos("y")),
//! ]);
//!
//! // a is core, b is dead
//! let fixed = ValueAssignment::from_pairs([("a", true), ("b", false)]);
//! let reduced = CoreDeadSimplifier::new(fixed).simplify(&f).unwrap();
//! assert_eq!(reduced, Formula::True);
//!
//! let fixed = ValueAssignment::from_pairs([("a", true), ("b", true)]);
//! let reduced = CoreDeadSimplifier::new(fixed).simplify(&f).unwrap();
//! assert_eq!(reduced.to_string(), "(x | y)");
//! ```
//!
//! ## Core Components
//!
//! - **[`assignment`]**: Literal sets and the `simplify`/`adapt` primitives.
//! - **[`arena`]**: Arena-backed formula trees with slot-level rewrites.
//! - **[`visitor`]**: The depth-first traversal driver used by the simplifiers.
//! - **[`feature_model`]**: Translation of feature trees into constraints.
//! - **[`dot`]**: Utilities for visualizing formula trees using Graphviz.

pub mod and_or;
pub mod arena;
pub mod assignment;
pub mod core_dead;
pub mod dot;
pub mod error;
pub mod eval;
pub mod feature_model;
pub mod formula;
pub mod list;
pub mod types;
pub mod value;
pub mod variable_map;
pub mod visitor;
