//! Owned (boxed) formula trees.
//!
//! [`Formula`] is the convenient form for building, comparing and printing
//! formulas. Rewriting happens on the arena form, see [`arena`][crate::arena];
//! [`FormulaArena::insert`][crate::arena::FormulaArena::insert] and
//! [`FormulaArena::to_boxed`][crate::arena::FormulaArena::to_boxed] convert
//! between the two.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    True,
    False,
    /// A (possibly negated) reference to a Boolean variable.
    Literal { name: String, positive: bool },
    /// Equality of two terms.
    Equals(Box<Formula>, Box<Formula>),
    /// A term naming a variable.
    Variable(String),
    /// A constant term.
    Constant(Value),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Not(Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    BiImplies(Box<Formula>, Box<Formula>),
    ForAll(String, Box<Formula>),
    Exists(String, Box<Formula>),
    /// Root wrapper giving the top formula a parent slot.
    Reference(Box<Formula>),
}

impl Formula {
    pub fn literal(name: impl Into<String>, positive: bool) -> Self {
        Formula::Literal {
            name: name.into(),
            positive,
        }
    }

    /// Positive literal.
    pub fn pos(name: impl Into<String>) -> Self {
        Self::literal(name, true)
    }

    /// Negative literal.
    pub fn neg(name: impl Into<String>) -> Self {
        Self::literal(name, false)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Formula::Variable(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Formula::Constant(value.into())
    }

    pub fn equals(lhs: Self, rhs: Self) -> Self {
        Formula::Equals(Box::new(lhs), Box::new(rhs))
    }

    pub fn and(children: impl IntoIterator<Item = Formula>) -> Self {
        Formula::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Formula>) -> Self {
        Formula::Or(children.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(formula: Self) -> Self {
        Formula::Not(Box::new(formula))
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn bi_implies(lhs: Self, rhs: Self) -> Self {
        Formula::BiImplies(Box::new(lhs), Box::new(rhs))
    }

    pub fn forall(variable: impl Into<String>, body: Self) -> Self {
        Formula::ForAll(variable.into(), Box::new(body))
    }

    pub fn exists(variable: impl Into<String>, body: Self) -> Self {
        Formula::Exists(variable.into(), Box::new(body))
    }

    pub fn reference(formula: Self) -> Self {
        Formula::Reference(Box::new(formula))
    }

    /// Children in slot order.
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Formula::True
            | Formula::False
            | Formula::Literal { .. }
            | Formula::Variable(_)
            | Formula::Constant(_) => vec![],
            Formula::And(cs) | Formula::Or(cs) => cs.iter().collect(),
            Formula::Not(a) | Formula::ForAll(_, a) | Formula::Exists(_, a) | Formula::Reference(a) => vec![&**a],
            Formula::Equals(a, b) | Formula::Implies(a, b) | Formula::BiImplies(a, b) => vec![&**a, &**b],
        }
    }

    /// Names of all variables occurring in literals and variable terms.
    pub fn variable_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_variable_names(&mut names);
        names
    }

    fn collect_variable_names(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::Literal { name, .. } | Formula::Variable(name) => {
                names.insert(name.clone());
            }
            _ => {
                for child in self.children() {
                    child.collect_variable_names(names);
                }
            }
        }
    }
}

impl BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::and([self, rhs])
    }
}

impl BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::or([self, rhs])
    }
}

impl Not for Formula {
    type Output = Formula;

    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self))
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, name: &str, op: &str, children: &[Formula]) -> fmt::Result {
    if children.is_empty() {
        return write!(f, "{}()", name);
    }
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::True => write!(f, "true"),
            Formula::False => write!(f, "false"),
            Formula::Literal { name, positive } => {
                write!(f, "{}{}", if *positive { "" } else { "-" }, name)
            }
            Formula::Equals(a, b) => write!(f, "({} = {})", a, b),
            Formula::Variable(name) => write!(f, "{}", name),
            Formula::Constant(value) => write!(f, "{}", value),
            Formula::And(cs) => write_joined(f, "and", "&", cs),
            Formula::Or(cs) => write_joined(f, "or", "|", cs),
            Formula::Not(a) => write!(f, "!{}", a),
            Formula::Implies(a, b) => write!(f, "({} => {})", a, b),
            Formula::BiImplies(a, b) => write!(f, "({} <=> {})", a, b),
            Formula::ForAll(v, a) => write!(f, "(forall {}. {})", v, a),
            Formula::Exists(v, a) => write!(f, "(exists {}. {})", v, a),
            Formula::Reference(a) => write!(f, "{}", a),
        }
    }
}
