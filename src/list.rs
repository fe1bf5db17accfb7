//! Lists of clauses and solutions sharing one variable namespace.

use log::debug;

use crate::assignment::{BooleanClause, BooleanSolution, LiteralSet};
use crate::error::{Diagnosed, Result};
use crate::value::ValueAssignment;
use crate::variable_map::VariableMap;

/// A conjunction of clauses, i.e. a CNF over `variable_count` variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanClauseList {
    clauses: Vec<BooleanClause>,
    variable_count: usize,
}

impl BooleanClauseList {
    pub fn new(variable_count: usize) -> Self {
        Self {
            clauses: Vec::new(),
            variable_count,
        }
    }

    pub fn from_clauses(variable_count: usize, clauses: Vec<BooleanClause>) -> Self {
        Self {
            clauses,
            variable_count,
        }
    }

    pub fn push(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BooleanClause> + '_ {
        self.clauses.iter()
    }

    /// Re-indexes every clause into the namespace of `new`.
    ///
    /// All-or-nothing: the first failing clause aborts the whole list.
    pub fn adapt(&self, old: &VariableMap, new: &VariableMap) -> Result<Self> {
        let clauses = self
            .clauses
            .iter()
            .map(|c| c.adapt(old, new).map(BooleanClause::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_clauses(new.len(), clauses))
    }

    /// Deduplicates literals in every clause and drops tautological clauses.
    pub fn simplify(&self) -> Self {
        let mut clauses = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            let simplified = clause.simplify();
            if crate::assignment::is_degenerate(&simplified) {
                debug!("simplify: dropping tautology {}", clause);
                continue;
            }
            clauses.push(BooleanClause::new(simplified));
        }
        Self::from_clauses(self.variable_count, clauses)
    }
}

/// A list of solutions, typically models of a [`BooleanClauseList`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanSolutionList {
    solutions: Vec<BooleanSolution>,
}

impl BooleanSolutionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, solution: BooleanSolution) {
        self.solutions.push(solution);
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BooleanSolution> + '_ {
        self.solutions.iter()
    }

    pub fn adapt(&self, old: &VariableMap, new: &VariableMap) -> Result<Self> {
        let solutions = self
            .solutions
            .iter()
            .map(|s| {
                s.adapt(old, new)
                    .map(|literals| BooleanSolution::with_variable_count(new.len(), literals))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { solutions })
    }

    /// Names every solution's literals through `map`, collecting all warnings.
    pub fn to_value_names(&self, map: &VariableMap) -> Diagnosed<Vec<ValueAssignment>> {
        let mut values = Vec::with_capacity(self.solutions.len());
        let mut problems = Vec::new();
        for solution in &self.solutions {
            let named = solution.to_value_name(map);
            problems.extend(named.problems);
            values.push(named.value);
        }
        Diagnosed::new(values, problems)
    }
}

impl FromIterator<BooleanSolution> for BooleanSolutionList {
    fn from_iter<I: IntoIterator<Item = BooleanSolution>>(iter: I) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}
