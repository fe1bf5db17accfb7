//! Three-valued evaluation of formulas under a partial assignment.
//!
//! `Some(b)` is a definite truth value, `None` means "unknown": a variable is
//! unassigned, holds a non-Boolean value where a Boolean is needed, or the
//! node is a quantifier (first-order evaluation is not supported).

use crate::arena::{FormulaArena, Idx, Node};
use crate::formula::Formula;
use crate::value::{Value, ValueAssignment};

impl FormulaArena {
    pub fn evaluate(&self, idx: Idx, assignment: &ValueAssignment) -> Option<bool> {
        match self.get(idx) {
            Node::True => Some(true),
            Node::False => Some(false),
            Node::Literal { name, positive } => assignment.get(name)?.as_bool().map(|v| v == *positive),
            Node::Variable(_) | Node::Constant(_) => self.term_value(idx, assignment)?.as_bool(),
            Node::Equals([a, b]) => {
                let lhs = self.term_value(*a, assignment)?;
                let rhs = self.term_value(*b, assignment)?;
                Some(values_equal(&lhs, &rhs))
            }
            Node::And(cs) => conjunction(cs.iter().map(|&c| self.evaluate(c, assignment))),
            Node::Or(cs) => disjunction(cs.iter().map(|&c| self.evaluate(c, assignment))),
            Node::Not(a) => self.evaluate(*a, assignment).map(|v| !v),
            Node::Implies([a, b]) => {
                let premise = self.evaluate(*a, assignment).map(|v| !v);
                disjunction([premise, self.evaluate(*b, assignment)])
            }
            Node::BiImplies([a, b]) => {
                let lhs = self.evaluate(*a, assignment)?;
                let rhs = self.evaluate(*b, assignment)?;
                Some(lhs == rhs)
            }
            Node::ForAll { .. } | Node::Exists { .. } => None,
            Node::Reference(a) => self.evaluate(*a, assignment),
        }
    }

    fn term_value(&self, idx: Idx, assignment: &ValueAssignment) -> Option<Value> {
        match self.get(idx) {
            Node::Variable(name) => assignment.get(name).cloned(),
            Node::Constant(value) => Some(value.clone()),
            _ => self.evaluate(idx, assignment).map(Value::Bool),
        }
    }
}

impl Formula {
    pub fn evaluate(&self, assignment: &ValueAssignment) -> Option<bool> {
        let (arena, root) = FormulaArena::from_boxed(self);
        arena.evaluate(root, assignment)
    }
}

fn conjunction(values: impl IntoIterator<Item = Option<bool>>) -> Option<bool> {
    let mut result = Some(true);
    for value in values {
        match value {
            Some(false) => return Some(false),
            None => result = None,
            Some(true) => {}
        }
    }
    result
}

fn disjunction(values: impl IntoIterator<Item = Option<bool>>) -> Option<bool> {
    let mut result = Some(false);
    for value in values {
        match value {
            Some(true) => return Some(true),
            None => result = None,
            Some(false) => {}
        }
    }
    result
}

fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Int(i), Value::Real(r)) | (Value::Real(r), Value::Int(i)) => *i as f64 == *r,
        _ => lhs == rhs,
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn assign(pairs: &[(&str, bool)]) -> ValueAssignment {
        ValueAssignment::from_pairs(pairs.iter().map(|&(n, v)| (n, v)))
    }

    #[test]
    fn test_eval_connectives() {
        let f = Formula::implies(Formula::pos("a"), Formula::pos("b") | Formula::neg("c"));
        assert_eq!(f.evaluate(&assign(&[("a", true), ("b", false), ("c", true)])), Some(false));
        assert_eq!(f.evaluate(&assign(&[("a", true), ("b", false), ("c", false)])), Some(true));
        assert_eq!(f.evaluate(&assign(&[("a", false)])), Some(true));

        let g = Formula::bi_implies(Formula::pos("a"), !Formula::pos("b"));
        assert_eq!(g.evaluate(&assign(&[("a", true), ("b", false)])), Some(true));
        assert_eq!(g.evaluate(&assign(&[("a", true)])), None);
    }

    #[test]
    fn test_eval_unknowns() {
        let f = Formula::pos("a") & Formula::pos("b");
        assert_eq!(f.evaluate(&assign(&[("a", true)])), None);
        assert_eq!(f.evaluate(&assign(&[("b", false)])), Some(false));
        assert_eq!(Formula::and([]).evaluate(&ValueAssignment::new()), Some(true));
        assert_eq!(Formula::or([]).evaluate(&ValueAssignment::new()), Some(false));
    }

    #[test]
    fn test_eval_equals_and_quantifiers() {
        let mut assignment = ValueAssignment::new();
        assignment.set("n", 3i64);
        let eq = Formula::equals(Formula::variable("n"), Formula::constant(3.0));
        assert_eq!(eq.evaluate(&assignment), Some(true));
        let ne = Formula::equals(Formula::variable("n"), Formula::constant(4i64));
        assert_eq!(ne.evaluate(&assignment), Some(false));
        assert_eq!(Formula::forall("n", eq).evaluate(&assignment), None);
    }
}
