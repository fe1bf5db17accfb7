//! Indexed Boolean representation: assignments, clauses and solutions.
//!
//! All three containers store an ordered sequence of signed-integer literals
//! (see [`types`][crate::types]). Duplicates and the placeholder literal `0`
//! are structurally permitted. The containers differ only in how the sequence
//! is read:
//!
//! - [`BooleanAssignment`]: a plain set of literals,
//! - [`BooleanClause`]: a disjunction,
//! - [`BooleanSolution`]: a conjunction over `variable_count` variables.
//!
//! The shared operations live in the [`LiteralSet`] trait.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use indexmap::IndexSet;
use log::debug;

use crate::error::{Diagnosed, Problem, Result};
use crate::value::ValueAssignment;
use crate::variable_map::VariableMap;

/// Removes duplicate literals, or detects a contradiction/tautology.
///
/// Literals are scanned left to right. As soon as a literal whose negation
/// was already seen is met, the degenerate pair `[literal, -literal]` is
/// returned; callers must check for it with [`is_degenerate`].
/// Otherwise duplicates are dropped, keeping first occurrences in order.
///
/// Note that `0` is its own negation, so a second `0` yields `[0, 0]`.
/// `i32::MIN` has no negation and is only ever deduplicated.
pub fn simplify(literals: &[i32]) -> Vec<i32> {
    let mut seen = IndexSet::with_capacity(literals.len());
    for &literal in literals {
        if let Some(negated) = literal.checked_neg() {
            if seen.contains(&negated) {
                return vec![literal, negated];
            }
        }
        seen.insert(literal);
    }
    if seen.len() == literals.len() {
        literals.to_vec()
    } else {
        seen.into_iter().collect()
    }
}

/// Whether `literals` has the `[l, -l]` shape that [`simplify`] uses to signal degeneracy.
pub fn is_degenerate(literals: &[i32]) -> bool {
    matches!(literals, [a, b] if a.checked_neg() == Some(*b))
}

/// Re-indexes literals from the namespace of `old` into the namespace of `new`.
///
/// Polarity is preserved. The conversion is all-or-nothing: the first literal
/// whose index is unknown to `old`, or whose name is unknown to `new`, aborts it.
pub fn adapt(literals: &[i32], old: &VariableMap, new: &VariableMap) -> Result<Vec<i32>> {
    literals
        .iter()
        .map(|&literal| adapt_literal(literal, old, new))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| {
            debug!("adapt({:?}) failed: {}", literals, e);
            e
        })
}

/// Re-indexes literals in place. On failure the buffer is left untouched.
pub fn adapt_in_place(literals: &mut [i32], old: &VariableMap, new: &VariableMap) -> Result<()> {
    let adapted = adapt(literals, old, new)?;
    literals.copy_from_slice(&adapted);
    Ok(())
}

fn adapt_literal(literal: i32, old: &VariableMap, new: &VariableMap) -> Result<i32> {
    let name = old.lookup_name(literal.unsigned_abs())?;
    let index = new.lookup_index(name)? as i32;
    Ok(if literal < 0 { -index } else { index })
}

/// For each variable, marks the position of its first occurrence.
fn mark_first_occurrences<S: LiteralSet + ?Sized>(set: &S, variables: &[u32]) -> Vec<bool> {
    let mut marked = vec![false; set.len()];
    for &variable in variables {
        if let Some(i) = set.index_of_variable(variable) {
            marked[i] = true;
        }
    }
    marked
}

fn select<S: LiteralSet + ?Sized>(set: &S, marked: &[bool], keep_marked: bool) -> Vec<i32> {
    set.literals()
        .iter()
        .zip(marked)
        .filter(|&(_, &m)| m == keep_marked)
        .map(|(&l, _)| l)
        .collect()
}

fn non_zero(literals: &[i32]) -> Vec<i32> {
    literals.iter().copied().filter(|&l| l != 0).collect()
}

fn write_literals(f: &mut fmt::Formatter<'_>, literals: &[i32]) -> fmt::Result {
    for (i, literal) in literals.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", literal)?;
    }
    Ok(())
}

/// Operations shared by every literal container.
pub trait LiteralSet {
    fn literals(&self) -> &[i32];

    fn len(&self) -> usize {
        self.literals().len()
    }

    fn is_empty(&self) -> bool {
        self.literals().is_empty()
    }

    /// See [`simplify`].
    fn simplify(&self) -> Vec<i32> {
        simplify(self.literals())
    }

    /// See [`is_degenerate`].
    fn is_degenerate(&self) -> bool {
        is_degenerate(self.literals())
    }

    /// See [`adapt`].
    fn adapt(&self, old: &VariableMap, new: &VariableMap) -> Result<Vec<i32>> {
        adapt(self.literals(), old, new)
    }

    /// Position of the first literal over `variable`, regardless of polarity.
    fn index_of_variable(&self, variable: u32) -> Option<usize> {
        self.literals().iter().position(|l| l.unsigned_abs() == variable)
    }

    fn contains_any_variable(&self, variables: &[u32]) -> bool {
        variables.iter().any(|&v| self.index_of_variable(v).is_some())
    }

    /// Returns `true` only when **none** of `variables` occurs, despite the name.
    ///
    /// Use [`contains_every_variable`][Self::contains_every_variable] to test
    /// that all variables occur.
    fn contains_all_variables(&self, variables: &[u32]) -> bool {
        variables.iter().all(|&v| self.index_of_variable(v).is_none())
    }

    /// Returns `true` when every one of `variables` occurs.
    fn contains_every_variable(&self, variables: &[u32]) -> bool {
        variables.iter().all(|&v| self.index_of_variable(v).is_some())
    }

    /// Removes the first occurrence of each variable. Later occurrences survive.
    fn remove_all_variables(&self, variables: &[u32]) -> Vec<i32> {
        let marked = mark_first_occurrences(self, variables);
        select(self, &marked, false)
    }

    /// Keeps only the first occurrence of each variable.
    fn retain_all_variables(&self, variables: &[u32]) -> Vec<i32> {
        let marked = mark_first_occurrences(self, variables);
        select(self, &marked, true)
    }

    /// Appends the literals of `other` that are not already present.
    fn add_all(&self, other: &[i32]) -> BooleanAssignment {
        let mut literals = self.literals().to_vec();
        for &literal in other {
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        BooleanAssignment::new(literals)
    }

    /// Keeps the literals that also occur in `other`.
    fn retain_all(&self, other: &[i32]) -> BooleanAssignment {
        let other: HashSet<i32> = other.iter().copied().collect();
        BooleanAssignment::new(self.literals().iter().copied().filter(|l| other.contains(l)).collect())
    }

    /// Drops the literals that occur in `other`.
    fn remove_all(&self, other: &[i32]) -> BooleanAssignment {
        let other: HashSet<i32> = other.iter().copied().collect();
        BooleanAssignment::new(self.literals().iter().copied().filter(|l| !other.contains(l)).collect())
    }

    fn to_assignment(&self) -> BooleanAssignment {
        BooleanAssignment::new(non_zero(self.literals()))
    }

    fn to_clause(&self) -> BooleanClause {
        BooleanClause::new(non_zero(self.literals()))
    }

    /// Drops `0` literals; the variable count is derived from the largest index left.
    fn to_solution(&self) -> BooleanSolution {
        BooleanSolution::new(non_zero(self.literals()))
    }

    /// Projects literals to `(index, value)` pairs, naming variables by their index.
    fn to_value(&self) -> ValueAssignment {
        let mut assignment = ValueAssignment::new();
        for &literal in self.literals().iter().filter(|&&l| l != 0) {
            assignment.set(literal.unsigned_abs().to_string(), literal > 0);
        }
        assignment
    }

    /// Projects literals to `(name, value)` pairs using the names in `map`.
    ///
    /// Indices unknown to `map` are skipped and reported as warnings.
    fn to_value_name(&self, map: &VariableMap) -> Diagnosed<ValueAssignment> {
        let mut assignment = ValueAssignment::new();
        let mut problems = Vec::new();
        for &literal in self.literals().iter().filter(|&&l| l != 0) {
            let index = literal.unsigned_abs();
            match map.name_of(index) {
                Some(name) => {
                    assignment.set(name, literal > 0);
                }
                None => problems.push(Problem::warning(format!("no variable with index {}", index))),
            }
        }
        Diagnosed::new(assignment, problems)
    }

    /// Value of the first literal over `variable`; `None` if absent.
    fn get_value(&self, variable: u32) -> Option<bool> {
        let i = self.index_of_variable(variable)?;
        let literal = self.literals()[i];
        if literal == 0 {
            None
        } else {
            Some(literal > 0)
        }
    }

    /// All assigned values by variable; later literals overwrite earlier ones.
    fn get_all(&self) -> BTreeMap<u32, bool> {
        self.literals()
            .iter()
            .filter(|&&l| l != 0)
            .map(|&l| (l.unsigned_abs(), l > 0))
            .collect()
    }
}

/// A general-purpose set of literals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BooleanAssignment(Vec<i32>);

impl BooleanAssignment {
    pub fn new(literals: Vec<i32>) -> Self {
        Self(literals)
    }

    pub fn into_literals(self) -> Vec<i32> {
        self.0
    }

    /// Negates every literal; `i32::MIN` is kept as is.
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().map(|&l| l.wrapping_neg()).collect())
    }
}

impl LiteralSet for BooleanAssignment {
    fn literals(&self) -> &[i32] {
        &self.0
    }
}

impl From<Vec<i32>> for BooleanAssignment {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl FromIterator<i32> for BooleanAssignment {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for BooleanAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_literals(f, &self.0)
    }
}

/// A disjunction of literals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BooleanClause(Vec<i32>);

impl BooleanClause {
    pub fn new(literals: Vec<i32>) -> Self {
        Self(literals)
    }

    pub fn into_literals(self) -> Vec<i32> {
        self.0
    }

    /// Negates every literal; `i32::MIN` is kept as is.
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().map(|&l| l.wrapping_neg()).collect())
    }
}

impl LiteralSet for BooleanClause {
    fn literals(&self) -> &[i32] {
        &self.0
    }
}

impl From<Vec<i32>> for BooleanClause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl FromIterator<i32> for BooleanClause {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for BooleanClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_literals(f, &self.0)?;
        write!(f, ")")
    }
}

/// A conjunction of literals over a declared number of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BooleanSolution {
    literals: Vec<i32>,
    variable_count: usize,
}

impl BooleanSolution {
    /// Creates a solution whose variable count is the largest index in `literals`.
    pub fn new(literals: Vec<i32>) -> Self {
        let variable_count = literals.iter().map(|l| l.unsigned_abs()).max().unwrap_or(0) as usize;
        Self {
            literals,
            variable_count,
        }
    }

    pub fn with_variable_count(variable_count: usize, literals: Vec<i32>) -> Self {
        Self {
            literals,
            variable_count,
        }
    }

    /// Declared number of variables; not necessarily the number of literals.
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn into_literals(self) -> Vec<i32> {
        self.literals
    }

    /// Negates every literal; `i32::MIN` is kept as is.
    pub fn inverse(&self) -> Self {
        Self {
            literals: self.literals.iter().map(|&l| l.wrapping_neg()).collect(),
            variable_count: self.variable_count,
        }
    }
}

impl LiteralSet for BooleanSolution {
    fn literals(&self) -> &[i32] {
        &self.literals
    }
}

impl From<Vec<i32>> for BooleanSolution {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl fmt::Display for BooleanSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_literals(f, &self.literals)?;
        write!(f, "] / {}", self.variable_count)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::FormulaError;
    use crate::value::Value;

    #[test]
    fn test_simplify_dedup() {
        assert_eq!(simplify(&[2, 3, 2]), vec![2, 3]);
        assert_eq!(simplify(&[1, 1, 1]), vec![1]);
        assert_eq!(simplify(&[]), Vec::<i32>::new());
    }

    #[test]
    fn test_simplify_copy_when_unique() {
        let literals = [3, -1, 2];
        assert_eq!(simplify(&literals), vec![3, -1, 2]);
    }

    #[test]
    fn test_simplify_contradiction() {
        assert_eq!(simplify(&[1, 2, -1, 3]), vec![-1, 1]);
        assert_eq!(simplify(&[-4, 2, 2, 4, -2]), vec![4, -4]);
        assert!(is_degenerate(&simplify(&[5, -5])));
        assert!(!is_degenerate(&simplify(&[5, 6])));
    }

    #[test]
    fn test_simplify_zero_twice_is_degenerate() {
        assert_eq!(simplify(&[0, 1, 0]), vec![0, 0]);
        assert!(is_degenerate(&simplify(&[0, 0])));
        assert_eq!(simplify(&[0, 1]), vec![0, 1]);
    }

    #[test]
    fn test_simplify_min_literal() {
        assert_eq!(simplify(&[i32::MIN]), vec![i32::MIN]);
        assert_eq!(simplify(&[i32::MIN, 1, i32::MIN]), vec![i32::MIN, 1]);
        assert_eq!(simplify(&[i32::MAX, i32::MIN, -i32::MAX]), vec![-i32::MAX, i32::MAX]);
        assert!(!is_degenerate(&[i32::MIN, i32::MIN]));
    }

    #[test]
    fn test_inverse_min_literal() {
        assert_eq!(BooleanAssignment::new(vec![i32::MIN, 2]).inverse(), BooleanAssignment::new(vec![i32::MIN, -2]));
        assert_eq!(BooleanClause::new(vec![-1, i32::MIN]).inverse(), BooleanClause::new(vec![1, i32::MIN]));
        let solution = BooleanSolution::with_variable_count(3, vec![i32::MIN, 3]).inverse();
        assert_eq!(solution.literals(), &[i32::MIN, -3]);
        assert_eq!(solution.variable_count(), 3);
    }

    #[test]
    fn test_simplify_idempotent() {
        for literals in [vec![1, 2, 1, 3], vec![4, 4, -5], vec![], vec![7]] {
            let once = simplify(&literals);
            assert!(!is_degenerate(&once));
            assert_eq!(simplify(&once), once);
        }
    }

    #[test]
    fn test_adapt() {
        let m1 = VariableMap::from_names(["a", "b"]).unwrap();
        let m2 = VariableMap::from_names(["b", "a"]).unwrap();
        assert_eq!(adapt(&[1, -2], &m1, &m2), Ok(vec![2, -1]));
        assert_eq!(adapt(&[], &m1, &m2), Ok(vec![]));
    }

    #[test]
    fn test_adapt_missing_index() {
        let m1 = VariableMap::from_names(["a", "b"]).unwrap();
        let m2 = VariableMap::from_names(["a", "b"]).unwrap();
        assert_eq!(adapt(&[1, -3, 9], &m1, &m2), Err(FormulaError::MissingIndex { index: 3 }));
        assert_eq!(adapt(&[0], &m1, &m2), Err(FormulaError::MissingIndex { index: 0 }));
    }

    #[test]
    fn test_adapt_missing_name() {
        let m1 = VariableMap::from_names(["a", "b"]).unwrap();
        let m2 = VariableMap::from_names(["a"]).unwrap();
        assert_eq!(
            adapt(&[1, 2], &m1, &m2),
            Err(FormulaError::MissingName { name: "b".to_string() })
        );
    }

    #[test]
    fn test_adapt_in_place() {
        let m1 = VariableMap::from_names(["a", "b", "c"]).unwrap();
        let m2 = VariableMap::from_names(["c", "b", "a"]).unwrap();
        let mut literals = vec![1, -3, 2];
        adapt_in_place(&mut literals, &m1, &m2).unwrap();
        assert_eq!(literals, vec![3, -1, 2]);

        let small = VariableMap::from_names(["c"]).unwrap();
        let mut partial = vec![-3, 3];
        assert!(adapt_in_place(&mut partial, &m1, &small).is_ok());
        assert_eq!(partial, vec![-1, 1]);

        let mut failing = vec![3, 2];
        assert!(adapt_in_place(&mut failing, &m1, &small).is_err());
        assert_eq!(failing, vec![3, 2]);
    }

    #[test]
    fn test_index_of_variable_first_occurrence() {
        let set = BooleanAssignment::new(vec![2, -1, 1]);
        assert_eq!(set.index_of_variable(1), Some(1));
        assert_eq!(set.index_of_variable(2), Some(0));
        assert_eq!(set.index_of_variable(3), None);
    }

    #[test]
    fn test_contains_variables() {
        let set = BooleanClause::new(vec![1, -2]);
        assert!(set.contains_any_variable(&[3, 2]));
        assert!(!set.contains_any_variable(&[3, 4]));

        // Inverted-looking behaviour is preserved.
        assert!(set.contains_all_variables(&[3, 4]));
        assert!(!set.contains_all_variables(&[1, 2]));
        assert!(!set.contains_all_variables(&[1, 3]));

        assert!(set.contains_every_variable(&[1, 2]));
        assert!(!set.contains_every_variable(&[1, 3]));
    }

    #[test]
    fn test_remove_all_variables_first_occurrence_only() {
        let set = BooleanAssignment::new(vec![1, -1, 2]);
        assert_eq!(set.remove_all_variables(&[1]), vec![-1, 2]);
        assert_eq!(set.remove_all_variables(&[1, 2]), vec![-1]);
        assert_eq!(set.remove_all_variables(&[5]), vec![1, -1, 2]);
    }

    #[test]
    fn test_retain_all_variables() {
        let set = BooleanAssignment::new(vec![1, -1, 2, 3]);
        assert_eq!(set.retain_all_variables(&[1, 3]), vec![1, 3]);
        assert_eq!(set.retain_all_variables(&[]), Vec::<i32>::new());
    }

    #[test]
    fn test_literal_set_algebra() {
        let set = BooleanAssignment::new(vec![1, -2, 3]);
        assert_eq!(set.add_all(&[3, 4, -1]).literals(), &[1, -2, 3, 4, -1]);
        assert_eq!(set.retain_all(&[3, 2, 1]).literals(), &[1, 3]);
        assert_eq!(set.remove_all(&[-2]).literals(), &[1, 3]);
        assert_eq!(set.inverse().literals(), &[-1, 2, -3]);
    }

    #[test]
    fn test_conversions() {
        let set = BooleanAssignment::new(vec![0, -3, 1]);
        assert_eq!(set.to_assignment().literals(), &[-3, 1]);
        assert_eq!(set.to_clause().literals(), &[-3, 1]);

        let solution = set.to_solution();
        assert_eq!(solution.literals(), &[-3, 1]);
        assert_eq!(solution.variable_count(), 3);

        assert_eq!(BooleanClause::new(vec![0, 0]).to_solution().variable_count(), 0);
    }

    #[test]
    fn test_to_value() {
        let set = BooleanClause::new(vec![2, 0, -1]);
        let value = set.to_value();
        assert_eq!(value.get("2"), Some(&Value::Bool(true)));
        assert_eq!(value.get("1"), Some(&Value::Bool(false)));
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn test_to_value_name() {
        let map = VariableMap::from_names(["a", "b"]).unwrap();
        let set = BooleanSolution::new(vec![-1, 2, 0]);
        let value = set.to_value_name(&map);
        assert!(value.is_clean());
        assert_eq!(value.value.to_string(), "a=false, b=true");

        let lossy = BooleanAssignment::new(vec![1, 5]).to_value_name(&map);
        assert_eq!(lossy.value.len(), 1);
        assert_eq!(lossy.problems.len(), 1);
    }

    #[test]
    fn test_get_value_and_all() {
        let set = BooleanAssignment::new(vec![0, 3, -1, 1]);
        assert_eq!(set.get_value(1), Some(false));
        assert_eq!(set.get_value(3), Some(true));
        assert_eq!(set.get_value(2), None);
        assert_eq!(set.get_value(0), None);

        let all = set.get_all();
        assert_eq!(all.get(&1), Some(&true));
        assert_eq!(all.get(&3), Some(&true));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(BooleanAssignment::new(vec![1, -2]).to_string(), "1 -2");
        assert_eq!(BooleanClause::new(vec![1, -2]).to_string(), "(1 -2)");
        assert_eq!(BooleanSolution::new(vec![-3, 1]).to_string(), "[-3 1] / 3");
    }
}
