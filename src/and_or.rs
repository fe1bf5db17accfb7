//! Structural normalizer for nested conjunctions and disjunctions.
//!
//! Post-order rules:
//!
//! - `and(.., false, ..)` becomes `and(false)`, otherwise nested `and(..)`
//!   children and single-child `or(x)` children are spliced into the parent;
//! - `or` is symmetric with `true`, nested `or(..)` and single-child `and(x)`.
//!
//! Unit elements (`true` under `and`, `false` under `or`) are left in place.

use log::debug;

use crate::arena::{FormulaArena, Idx, Node, NodeKind};
use crate::error::Result;
use crate::formula::Formula;
use crate::visitor::{current, traverse, TraversalAction, TreeVisitor};

#[derive(Debug, Default, Copy, Clone)]
pub struct AndOrSimplifier;

impl AndOrSimplifier {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes the subtree rooted at `root` in place.
    pub fn apply(&mut self, arena: &mut FormulaArena, root: Idx) -> Result<()> {
        traverse(arena, root, self)
    }

    /// Normalizes a copy of `formula`.
    pub fn simplify(&mut self, formula: &Formula) -> Result<Formula> {
        let (mut arena, root) = FormulaArena::from_boxed(formula);
        self.apply(&mut arena, root)?;
        Ok(arena.to_boxed(root))
    }
}

impl TreeVisitor for AndOrSimplifier {
    fn first_visit(&mut self, arena: &FormulaArena, path: &[Idx]) -> TraversalAction {
        match arena.kind(current(path)) {
            NodeKind::Predicate => TraversalAction::SkipChildren,
            NodeKind::Connective | NodeKind::Quantifier => TraversalAction::Continue,
            NodeKind::Term => TraversalAction::Fail,
        }
    }

    fn last_visit(&mut self, arena: &mut FormulaArena, path: &[Idx]) -> Result<TraversalAction> {
        let node = current(path);
        let conjunction = match arena.get(node) {
            Node::And(_) => true,
            Node::Or(_) => false,
            _ => return Ok(TraversalAction::Continue),
        };
        let dominant = arena.mk_bool(!conjunction);
        if arena.children(node).contains(&dominant) {
            debug!("and_or: {} collapses to {}", node, !conjunction);
            arena.set_children(node, vec![dominant])?;
        } else {
            arena.flat_replace_children(node, |arena, child| match arena.get(child) {
                Node::And(grand) if conjunction || grand.len() == 1 => Some(grand.clone()),
                Node::Or(grand) if !conjunction || grand.len() == 1 => Some(grand.clone()),
                _ => None,
            })?;
        }
        Ok(TraversalAction::Continue)
    }
}
