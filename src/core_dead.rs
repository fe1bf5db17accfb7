//! Substitution reducer for core and dead variables.
//!
//! Given Boolean values for some variables (typically the core and dead
//! features of a model), substitutes them into a formula and folds the
//! resulting constants upward. The traversal root must be a
//! [`Reference`][Node::Reference], so that the top formula has a parent slot
//! to be folded into.
//!
//! Slot replacements applied to the children of every connective:
//!
//! | child                         | becomes   |
//! |-------------------------------|-----------|
//! | literal with a Boolean value  | `true` if value and polarity agree, else `false` |
//! | `and(x)`, `or(x)`             | `x`       |
//! | `!true`, `!false`             | `false`, `true` |
//! | `false => x`, `x => true`     | `true`    |
//! | `true => false`               | `false`   |
//! | `true => x`                   | `x`       |
//! | `x => false`                  | `!x`      |
//! | `true <=> x`, `x <=> true`    | `x`       |
//! | `false <=> false`             | `true`    |
//! | `false <=> x`, `x <=> false`  | `!x`      |
//!
//! Afterwards an `and` containing `false` becomes `and(false)` and otherwise
//! loses its `true` children; `or` is symmetric.

use log::debug;

use crate::arena::{FormulaArena, Idx, Node, NodeKind};
use crate::error::{FormulaError, Result};
use crate::formula::Formula;
use crate::value::ValueAssignment;
use crate::visitor::{current, traverse, TraversalAction, TreeVisitor};

const TRUE: Idx = FormulaArena::TRUE;
const FALSE: Idx = FormulaArena::FALSE;

#[derive(Debug, Clone, Default)]
pub struct CoreDeadSimplifier {
    values: ValueAssignment,
}

impl CoreDeadSimplifier {
    pub fn new(values: ValueAssignment) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &ValueAssignment {
        &self.values
    }

    /// Reduces the tree under the reference node `root` in place.
    pub fn apply(&mut self, arena: &mut FormulaArena, root: Idx) -> Result<()> {
        traverse(arena, root, self)
    }

    /// Reduces a copy of `formula`.
    pub fn simplify(&mut self, formula: &Formula) -> Result<Formula> {
        let mut arena = FormulaArena::new();
        let body = arena.insert(formula);
        let root = arena.mk_reference(body);
        self.apply(&mut arena, root)?;
        Ok(arena.to_boxed(arena.children(root)[0]))
    }
}

/// Replacement for a single child slot, if any rule applies.
fn fold(arena: &mut FormulaArena, child: Idx, values: &ValueAssignment) -> Option<Idx> {
    let folded = match *arena.get(child) {
        Node::Literal { ref name, positive } => {
            let value = values.get(name)?.as_bool()?;
            arena.mk_bool(value == positive)
        }
        Node::And(ref cs) | Node::Or(ref cs) if cs.len() == 1 => cs[0],
        Node::Not(TRUE) => FALSE,
        Node::Not(FALSE) => TRUE,
        Node::Implies([lhs, rhs]) => match (lhs, rhs) {
            (FALSE, _) | (_, TRUE) => TRUE,
            (TRUE, FALSE) => FALSE,
            (TRUE, x) => x,
            (x, FALSE) => arena.mk_not(x),
            _ => return None,
        },
        Node::BiImplies([lhs, rhs]) => match (lhs, rhs) {
            (TRUE, x) | (x, TRUE) => x,
            (FALSE, FALSE) => TRUE,
            (FALSE, x) | (x, FALSE) => arena.mk_not(x),
            _ => return None,
        },
        _ => return None,
    };
    Some(folded)
}

impl TreeVisitor for CoreDeadSimplifier {
    fn validate_root(&self, arena: &FormulaArena, root: Idx) -> Result<()> {
        match arena.get(root) {
            Node::Reference(_) => Ok(()),
            other => Err(FormulaError::structural(
                root,
                format!("root must be a reference, found {}", other.name()),
            )),
        }
    }

    fn first_visit(&mut self, arena: &FormulaArena, path: &[Idx]) -> TraversalAction {
        match arena.kind(current(path)) {
            NodeKind::Predicate => TraversalAction::SkipChildren,
            NodeKind::Connective => TraversalAction::Continue,
            NodeKind::Quantifier | NodeKind::Term => TraversalAction::Fail,
        }
    }

    fn last_visit(&mut self, arena: &mut FormulaArena, path: &[Idx]) -> Result<TraversalAction> {
        let node = current(path);
        if matches!(arena.kind(node), NodeKind::Predicate | NodeKind::Term) {
            return Ok(TraversalAction::Continue);
        }

        let values = &self.values;
        arena.replace_children(node, |arena, child| fold(arena, child, values))?;

        let conjunction = match arena.get(node) {
            Node::And(_) => true,
            Node::Or(_) => false,
            _ => return Ok(TraversalAction::Continue),
        };
        let dominant = arena.mk_bool(!conjunction);
        let unit = arena.mk_bool(conjunction);
        if arena.children(node).contains(&dominant) {
            debug!("core_dead: {} collapses to {}", node, !conjunction);
            arena.set_children(node, vec![dominant])?;
        } else {
            arena.flat_replace_children(node, |_, child| (child == unit).then(Vec::new))?;
        }
        Ok(TraversalAction::Continue)
    }
}
