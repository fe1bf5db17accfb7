//! Type-safe handle for indexed variables.
//!
//! Variables are 1-indexed: index 0 is reserved and never names a variable.
//! A literal is a plain `i32` whose sign encodes polarity and whose magnitude
//! is the variable index.
use std::fmt;

/// A variable index (1-indexed).
///
/// # Invariants
///
/// - Variable indices must be >= 1 (0 means "no variable")
/// - Indices are scoped to the [`VariableMap`][crate::variable_map::VariableMap] that allocated them
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`. Variables must be 1-indexed.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable indices must be >= 1");
        Var(id)
    }

    /// Creates a variable if `id` is a valid index.
    pub fn try_new(id: u32) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Var(id))
        }
    }

    /// Returns the variable referenced by a literal, or `None` for the literal `0`.
    pub fn of_literal(literal: i32) -> Option<Self> {
        Self::try_new(literal.unsigned_abs())
    }

    /// Returns the raw variable index as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Positive literal of this variable.
    pub fn pos(self) -> i32 {
        self.0 as i32
    }

    /// Negative literal of this variable.
    pub fn neg(self) -> i32 {
        -(self.0 as i32)
    }

    /// Literal of this variable with the given polarity.
    pub fn literal(self, positive: bool) -> i32 {
        if positive {
            self.pos()
        } else {
            self.neg()
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}
