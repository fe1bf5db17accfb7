//! Symbolic (named-variable) assignments.

use std::fmt;

use indexmap::IndexMap;
use log::warn;

use crate::assignment::{BooleanAssignment, BooleanSolution};
use crate::error::{Diagnosed, Problem};
use crate::variable_map::VariableMap;

/// Value of a variable in a symbolic assignment.
///
/// Boolean values are the common case; numeric values appear for variables
/// of non-Boolean domains.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
        }
    }
}

/// Insertion-ordered mapping from variable names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueAssignment {
    values: IndexMap<String, Value>,
}

impl ValueAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment; a repeated name keeps its first position and its last value.
    pub fn from_pairs<I, S, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: pairs.into_iter().map(|(n, v)| (n.into(), v.into())).collect(),
        }
    }

    /// Sets the value of `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Removes `name`, keeping the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Translates into indexed literals.
    ///
    /// Names absent from `map` and non-Boolean values cannot be expressed as
    /// literals: they are skipped and reported as warnings.
    pub fn to_boolean(&self, map: &VariableMap) -> Diagnosed<BooleanAssignment> {
        self.to_literals(map).map(BooleanAssignment::new)
    }

    fn to_literals(&self, map: &VariableMap) -> Diagnosed<Vec<i32>> {
        let mut literals = Vec::with_capacity(self.values.len());
        let mut problems = Vec::new();
        for (name, value) in &self.values {
            let Some(var) = map.var_of(name) else {
                warn!("to_boolean: no variable named {}", name);
                problems.push(Problem::warning(format!("no variable named {}", name)));
                continue;
            };
            match value.as_bool() {
                Some(b) => literals.push(var.literal(b)),
                None => {
                    warn!("to_boolean: {} = {} is not Boolean", name, value);
                    problems.push(Problem::warning(format!(
                        "value {} of variable {} is not Boolean",
                        value, name
                    )));
                }
            }
        }
        Diagnosed::new(literals, problems)
    }
}

impl fmt::Display for ValueAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// A (partial) symbolic solution, i.e. a conjunction of equalities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSolution(pub ValueAssignment);

impl ValueSolution {
    pub fn new(assignment: ValueAssignment) -> Self {
        Self(assignment)
    }

    pub fn assignment(&self) -> &ValueAssignment {
        &self.0
    }

    /// Translates into a Boolean solution over the whole of `map`.
    ///
    /// The declared variable count is the size of `map`.
    pub fn to_boolean(&self, map: &VariableMap) -> Diagnosed<BooleanSolution> {
        self.0
            .to_literals(map)
            .map(|literals| BooleanSolution::with_variable_count(map.len(), literals))
    }
}

impl From<ValueAssignment> for ValueSolution {
    fn from(assignment: ValueAssignment) -> Self {
        Self(assignment)
    }
}
