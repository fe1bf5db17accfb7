//! Depth-first traversal driver for rewriting visitors.
//!
//! A [`TreeVisitor`] is called twice per node: [`first_visit`][TreeVisitor::first_visit]
//! on the way down decides whether to descend, and [`last_visit`][TreeVisitor::last_visit]
//! on the way up, once all children are final, may rewrite the node's child
//! slots. Both receive the path from the traversal root to the current node.

use log::debug;

use crate::arena::{FormulaArena, Idx};
use crate::error::{FormulaError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TraversalAction {
    /// Proceed normally.
    Continue,
    /// Do not descend into the children of the current node.
    SkipChildren,
    /// Abort the traversal.
    Fail,
}

pub trait TreeVisitor {
    /// Checks the traversal root before anything is visited.
    fn validate_root(&self, _arena: &FormulaArena, _root: Idx) -> Result<()> {
        Ok(())
    }

    fn first_visit(&mut self, arena: &FormulaArena, path: &[Idx]) -> TraversalAction;

    fn last_visit(&mut self, arena: &mut FormulaArena, path: &[Idx]) -> Result<TraversalAction>;
}

struct Frame {
    node: Idx,
    next_child: usize,
    descend: bool,
}

/// Runs `visitor` over the tree rooted at `root`, rewriting it in place.
///
/// `last_visit` is called for every entered node, including nodes whose
/// children were skipped. A [`TraversalAction::Fail`] from either callback
/// aborts with [`FormulaError::StructuralViolation`].
pub fn traverse<V>(arena: &mut FormulaArena, root: Idx, visitor: &mut V) -> Result<()>
where
    V: TreeVisitor + ?Sized,
{
    visitor.validate_root(arena, root)?;

    let mut path: Vec<Idx> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    enter(arena, root, visitor, &mut path, &mut stack)?;

    while let Some(frame) = stack.last_mut() {
        let children = arena.children(frame.node);
        if frame.descend && frame.next_child < children.len() {
            let child = children[frame.next_child];
            frame.next_child += 1;
            enter(arena, child, visitor, &mut path, &mut stack)?;
        } else {
            let node = frame.node;
            if visitor.last_visit(arena, &path)? == TraversalAction::Fail {
                debug!("traverse: last_visit failed at {}", node);
                return Err(FormulaError::structural(
                    node,
                    format!("unexpected {} node", arena.get(node).name()),
                ));
            }
            stack.pop();
            path.pop();
        }
    }
    Ok(())
}

fn enter<V>(
    arena: &FormulaArena,
    node: Idx,
    visitor: &mut V,
    path: &mut Vec<Idx>,
    stack: &mut Vec<Frame>,
) -> Result<()>
where
    V: TreeVisitor + ?Sized,
{
    path.push(node);
    let descend = match visitor.first_visit(arena, path) {
        TraversalAction::Continue => true,
        TraversalAction::SkipChildren => false,
        TraversalAction::Fail => {
            debug!("traverse: first_visit failed at {}", node);
            return Err(FormulaError::structural(
                node,
                format!("unexpected {} node", arena.get(node).name()),
            ));
        }
    };
    stack.push(Frame {
        node,
        next_child: 0,
        descend,
    });
    Ok(())
}

/// Current node of a traversal path.
pub(crate) fn current(path: &[Idx]) -> Idx {
    *path.last().expect("traversal path is never empty")
}
