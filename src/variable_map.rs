//! Bijection between variable names and 1-based indices.

use std::collections::HashMap;
use std::fmt;

use crate::error::{FormulaError, Result};
use crate::types::Var;

/// Registry mapping variable names to indices `1..=N` and back.
///
/// Two maps are independent namespaces: the same name may receive different
/// indices in each. Use [`adapt`][crate::assignment::adapt] to move literals
/// from one namespace to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    /// Names by position; the name of variable `i` lives at `names[i - 1]`.
    names: Vec<String>,
    indices: HashMap<String, Var>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map assigning indices `1, 2, ...` in iteration order.
    ///
    /// Fails with [`FormulaError::InputRejected`] on a repeated name.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for name in names {
            let name = name.into();
            if map.contains_name(&name) {
                return Err(FormulaError::rejected(format!("duplicate variable name {}", name)));
            }
            map.add(name);
        }
        Ok(map)
    }

    /// Registers `name`, returning its variable. Known names keep their index.
    pub fn add(&mut self, name: impl Into<String>) -> Var {
        let name = name.into();
        if let Some(&var) = self.indices.get(&name) {
            return var;
        }
        self.names.push(name.clone());
        let var = Var::new(self.names.len() as u32);
        self.indices.insert(name, var);
        var
    }

    /// Number of registered variables (the largest valid index).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the variable with the given index, if any.
    pub fn name_of(&self, index: u32) -> Option<&str> {
        let position = (index as usize).checked_sub(1)?;
        self.names.get(position).map(String::as_str)
    }

    /// Index of the variable with the given name, if any.
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.var_of(name).map(Var::id)
    }

    pub fn var_of(&self, name: &str) -> Option<Var> {
        self.indices.get(name).copied()
    }

    /// Like [`name_of`][Self::name_of], but absence is an error.
    pub fn lookup_name(&self, index: u32) -> Result<&str> {
        self.name_of(index).ok_or(FormulaError::MissingIndex { index })
    }

    /// Like [`index_of`][Self::index_of], but absence is an error.
    pub fn lookup_index(&self, name: &str) -> Result<u32> {
        self.index_of(name).ok_or_else(|| FormulaError::MissingName { name: name.to_string() })
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn contains_index(&self, index: u32) -> bool {
        self.name_of(index).is_some()
    }

    /// Iterates over `(variable, name)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (Var::new(i as u32 + 1), name.as_str()))
    }

    /// Iterates over names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for VariableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, name)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", var.id(), name)?;
        }
        write!(f, "}}")
    }
}
