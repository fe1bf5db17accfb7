//! Arena representation of formula trees.
//!
//! Nodes live in a [`FormulaArena`] and are addressed by stable [`Idx`] handles.
//! Every interior node owns explicit child slots, so rewrites such as "replace
//! this child" or "splice the children of this child into me" are local slot
//! updates.
//!
//! # Constants
//!
//! Each arena holds exactly one `True` node and one `False` node, at the fixed
//! handles [`FormulaArena::TRUE`] and [`FormulaArena::FALSE`]. Adding a constant
//! returns the canonical handle, so constants are compared by handle and may
//! be shared by any number of parents. They are predicates and can never be
//! rewritten.
//!
//! # Ownership
//!
//! Apart from the constants, a node is expected to have a single parent.
//! Rewrites may orphan nodes; orphans stay in the arena but are unreachable.

use std::fmt;

use crate::error::{FormulaError, Result};
use crate::formula::Formula;
use crate::value::Value;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Idx(usize);

impl Idx {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Capability class of a node, used by visitors to gate traversal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeKind {
    /// Atomic proposition; no formula children.
    Predicate,
    /// Logical operator over formula children.
    Connective,
    /// Variable-binding connective.
    Quantifier,
    /// Value-level expression; only legal as a predicate argument.
    Term,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    True,
    False,
    Literal { name: String, positive: bool },
    Equals([Idx; 2]),
    Variable(String),
    Constant(Value),
    And(Vec<Idx>),
    Or(Vec<Idx>),
    Not(Idx),
    Implies([Idx; 2]),
    BiImplies([Idx; 2]),
    ForAll { variable: String, body: Idx },
    Exists { variable: String, body: Idx },
    Reference(Idx),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::True | Node::False | Node::Literal { .. } | Node::Equals(_) => NodeKind::Predicate,
            Node::Variable(_) | Node::Constant(_) => NodeKind::Term,
            Node::ForAll { .. } | Node::Exists { .. } => NodeKind::Quantifier,
            Node::And(_) | Node::Or(_) | Node::Not(_) | Node::Implies(_) | Node::BiImplies(_) | Node::Reference(_) => {
                NodeKind::Connective
            }
        }
    }

    pub fn children(&self) -> &[Idx] {
        match self {
            Node::True | Node::False | Node::Literal { .. } | Node::Variable(_) | Node::Constant(_) => &[],
            Node::And(cs) | Node::Or(cs) => cs,
            Node::Equals(cs) | Node::Implies(cs) | Node::BiImplies(cs) => cs,
            Node::Not(c) | Node::Reference(c) => std::slice::from_ref(c),
            Node::ForAll { body, .. } | Node::Exists { body, .. } => std::slice::from_ref(body),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Node::True => "true",
            Node::False => "false",
            Node::Literal { .. } => "literal",
            Node::Equals(_) => "=",
            Node::Variable(_) => "variable",
            Node::Constant(_) => "constant",
            Node::And(_) => "and",
            Node::Or(_) => "or",
            Node::Not(_) => "not",
            Node::Implies(_) => "implies",
            Node::BiImplies(_) => "biimplies",
            Node::ForAll { .. } => "forall",
            Node::Exists { .. } => "exists",
            Node::Reference(_) => "reference",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormulaArena {
    nodes: Vec<Node>,
}

impl Default for FormulaArena {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaArena {
    pub const TRUE: Idx = Idx(0);
    pub const FALSE: Idx = Idx(1);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::True, Node::False],
        }
    }

    pub fn get(&self, idx: Idx) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn kind(&self, idx: Idx) -> NodeKind {
        self.get(idx).kind()
    }

    pub fn children(&self, idx: Idx) -> &[Idx] {
        self.get(idx).children()
    }

    pub fn is_constant(&self, idx: Idx) -> bool {
        idx == Self::TRUE || idx == Self::FALSE
    }

    /// Number of allocated nodes, including orphans and the two constants.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates `node`. Constants resolve to their canonical handles.
    pub fn add(&mut self, node: Node) -> Idx {
        match node {
            Node::True => Self::TRUE,
            Node::False => Self::FALSE,
            node => {
                debug_assert!(node.children().iter().all(|c| c.0 < self.nodes.len()));
                self.nodes.push(node);
                Idx(self.nodes.len() - 1)
            }
        }
    }

    pub fn mk_true(&self) -> Idx {
        Self::TRUE
    }

    pub fn mk_false(&self) -> Idx {
        Self::FALSE
    }

    pub fn mk_bool(&self, value: bool) -> Idx {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    pub fn mk_literal(&mut self, name: impl Into<String>, positive: bool) -> Idx {
        self.add(Node::Literal {
            name: name.into(),
            positive,
        })
    }

    pub fn mk_variable(&mut self, name: impl Into<String>) -> Idx {
        self.add(Node::Variable(name.into()))
    }

    pub fn mk_constant(&mut self, value: impl Into<Value>) -> Idx {
        self.add(Node::Constant(value.into()))
    }

    pub fn mk_equals(&mut self, lhs: Idx, rhs: Idx) -> Idx {
        self.add(Node::Equals([lhs, rhs]))
    }

    pub fn mk_and(&mut self, children: impl IntoIterator<Item = Idx>) -> Idx {
        self.add(Node::And(children.into_iter().collect()))
    }

    pub fn mk_or(&mut self, children: impl IntoIterator<Item = Idx>) -> Idx {
        self.add(Node::Or(children.into_iter().collect()))
    }

    pub fn mk_not(&mut self, child: Idx) -> Idx {
        self.add(Node::Not(child))
    }

    pub fn mk_implies(&mut self, lhs: Idx, rhs: Idx) -> Idx {
        self.add(Node::Implies([lhs, rhs]))
    }

    pub fn mk_bi_implies(&mut self, lhs: Idx, rhs: Idx) -> Idx {
        self.add(Node::BiImplies([lhs, rhs]))
    }

    pub fn mk_forall(&mut self, variable: impl Into<String>, body: Idx) -> Idx {
        self.add(Node::ForAll {
            variable: variable.into(),
            body,
        })
    }

    pub fn mk_exists(&mut self, variable: impl Into<String>, body: Idx) -> Idx {
        self.add(Node::Exists {
            variable: variable.into(),
            body,
        })
    }

    pub fn mk_reference(&mut self, child: Idx) -> Idx {
        self.add(Node::Reference(child))
    }
}

impl FormulaArena {
    fn check_rewritable(&self, idx: Idx) -> Result<()> {
        match self.kind(idx) {
            NodeKind::Connective | NodeKind::Quantifier => Ok(()),
            NodeKind::Predicate | NodeKind::Term => Err(FormulaError::structural(
                idx,
                format!("cannot rewrite children of {}", self.get(idx).name()),
            )),
        }
    }

    /// Replaces all child slots of a connective at once.
    ///
    /// The number of children must fit the connective's arity.
    pub fn set_children(&mut self, idx: Idx, children: Vec<Idx>) -> Result<()> {
        self.check_rewritable(idx)?;
        let arity_error = |expected: usize, found: usize, name: &str| {
            FormulaError::structural(idx, format!("{} takes {} children, got {}", name, expected, found))
        };
        let node = &mut self.nodes[idx.0];
        let name = node.name();
        match node {
            Node::And(cs) | Node::Or(cs) => *cs = children,
            Node::Implies(cs) | Node::BiImplies(cs) => {
                *cs = children
                    .try_into()
                    .map_err(|c: Vec<Idx>| arity_error(2, c.len(), name))?;
            }
            Node::Not(c) | Node::Reference(c) | Node::ForAll { body: c, .. } | Node::Exists { body: c, .. } => {
                match children[..] {
                    [child] => *c = child,
                    _ => return Err(arity_error(1, children.len(), name)),
                }
            }
            _ => unreachable!("checked by check_rewritable"),
        }
        Ok(())
    }

    /// Replaces child slots one by one.
    ///
    /// `replace` is called for each child; `Some(new)` overwrites the slot,
    /// `None` keeps it. The callback may allocate new nodes.
    pub fn replace_children<F>(&mut self, idx: Idx, mut replace: F) -> Result<()>
    where
        F: FnMut(&mut FormulaArena, Idx) -> Option<Idx>,
    {
        self.check_rewritable(idx)?;
        let old = self.children(idx).to_vec();
        let mut new = Vec::with_capacity(old.len());
        let mut changed = false;
        for child in old {
            match replace(&mut *self, child) {
                Some(replacement) => {
                    changed |= replacement != child;
                    new.push(replacement);
                }
                None => new.push(child),
            }
        }
        if changed {
            self.set_children(idx, new)?;
        }
        Ok(())
    }

    /// Replaces each child of an `And`/`Or` by zero or more nodes.
    ///
    /// `splice` returns `Some(nodes)` to put `nodes` in place of the child,
    /// or `None` to keep it. Only variadic connectives accept this rewrite.
    pub fn flat_replace_children<F>(&mut self, idx: Idx, mut splice: F) -> Result<()>
    where
        F: FnMut(&FormulaArena, Idx) -> Option<Vec<Idx>>,
    {
        if !matches!(self.get(idx), Node::And(_) | Node::Or(_)) {
            return Err(FormulaError::structural(
                idx,
                format!("cannot splice children of {}", self.get(idx).name()),
            ));
        }
        let old = self.children(idx).to_vec();
        let mut new = Vec::with_capacity(old.len());
        let mut changed = false;
        for child in old {
            match splice(&*self, child) {
                Some(nodes) => {
                    changed = true;
                    new.extend(nodes);
                }
                None => new.push(child),
            }
        }
        if changed {
            self.set_children(idx, new)?;
        }
        Ok(())
    }
}

impl FormulaArena {
    /// Copies an owned formula into the arena, returning the handle of its root.
    pub fn insert(&mut self, formula: &Formula) -> Idx {
        let node = match formula {
            Formula::True => Node::True,
            Formula::False => Node::False,
            Formula::Literal { name, positive } => Node::Literal {
                name: name.clone(),
                positive: *positive,
            },
            Formula::Equals(a, b) => Node::Equals([self.insert(a), self.insert(b)]),
            Formula::Variable(name) => Node::Variable(name.clone()),
            Formula::Constant(value) => Node::Constant(value.clone()),
            Formula::And(cs) => Node::And(cs.iter().map(|c| self.insert(c)).collect()),
            Formula::Or(cs) => Node::Or(cs.iter().map(|c| self.insert(c)).collect()),
            Formula::Not(a) => Node::Not(self.insert(a)),
            Formula::Implies(a, b) => Node::Implies([self.insert(a), self.insert(b)]),
            Formula::BiImplies(a, b) => Node::BiImplies([self.insert(a), self.insert(b)]),
            Formula::ForAll(v, a) => Node::ForAll {
                variable: v.clone(),
                body: self.insert(a),
            },
            Formula::Exists(v, a) => Node::Exists {
                variable: v.clone(),
                body: self.insert(a),
            },
            Formula::Reference(a) => Node::Reference(self.insert(a)),
        };
        self.add(node)
    }

    /// Builds an arena holding `formula`, returning it with the root handle.
    pub fn from_boxed(formula: &Formula) -> (Self, Idx) {
        let mut arena = Self::new();
        let root = arena.insert(formula);
        (arena, root)
    }

    /// Copies the subtree rooted at `idx` out of the arena.
    pub fn to_boxed(&self, idx: Idx) -> Formula {
        let boxed = |i: Idx| Box::new(self.to_boxed(i));
        match self.get(idx) {
            Node::True => Formula::True,
            Node::False => Formula::False,
            Node::Literal { name, positive } => Formula::literal(name.clone(), *positive),
            Node::Equals([a, b]) => Formula::Equals(boxed(*a), boxed(*b)),
            Node::Variable(name) => Formula::Variable(name.clone()),
            Node::Constant(value) => Formula::Constant(value.clone()),
            Node::And(cs) => Formula::And(cs.iter().map(|&c| self.to_boxed(c)).collect()),
            Node::Or(cs) => Formula::Or(cs.iter().map(|&c| self.to_boxed(c)).collect()),
            Node::Not(a) => Formula::Not(boxed(*a)),
            Node::Implies([a, b]) => Formula::Implies(boxed(*a), boxed(*b)),
            Node::BiImplies([a, b]) => Formula::BiImplies(boxed(*a), boxed(*b)),
            Node::ForAll { variable, body } => Formula::ForAll(variable.clone(), boxed(*body)),
            Node::Exists { variable, body } => Formula::Exists(variable.clone(), boxed(*body)),
            Node::Reference(a) => Formula::Reference(boxed(*a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_constants_are_interned() {
        let mut arena = FormulaArena::new();
        assert_eq!(arena.add(Node::True), FormulaArena::TRUE);
        assert_eq!(arena.add(Node::False), FormulaArena::FALSE);
        assert_eq!(arena.mk_bool(true), FormulaArena::TRUE);

        let (arena, root) = FormulaArena::from_boxed(&Formula::and([Formula::True, Formula::True, Formula::False]));
        assert_eq!(arena.children(root), &[FormulaArena::TRUE, FormulaArena::TRUE, FormulaArena::FALSE]);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_roundtrip_boxed() {
        let formula = Formula::reference(Formula::and([
            Formula::pos("a"),
            Formula::or([Formula::neg("b"), Formula::True]),
            Formula::implies(Formula::pos("c"), Formula::not(Formula::pos("d"))),
            Formula::bi_implies(Formula::False, Formula::pos("e")),
            Formula::exists("x", Formula::equals(Formula::variable("x"), Formula::constant(2i64))),
        ]));
        let (arena, root) = FormulaArena::from_boxed(&formula);
        assert_eq!(arena.to_boxed(root), formula);
    }

    #[test]
    fn test_kinds() {
        let mut arena = FormulaArena::new();
        let a = arena.mk_literal("a", true);
        let x = arena.mk_variable("x");
        let one = arena.mk_constant(1i64);
        let eq = arena.mk_equals(x, one);
        let not = arena.mk_not(a);
        let all = arena.mk_forall("x", eq);
        assert_eq!(arena.kind(FormulaArena::TRUE), NodeKind::Predicate);
        assert_eq!(arena.kind(a), NodeKind::Predicate);
        assert_eq!(arena.kind(eq), NodeKind::Predicate);
        assert_eq!(arena.kind(x), NodeKind::Term);
        assert_eq!(arena.kind(one), NodeKind::Term);
        assert_eq!(arena.kind(not), NodeKind::Connective);
        assert_eq!(arena.kind(all), NodeKind::Quantifier);
        assert_eq!(arena.children(eq), &[x, one]);
        assert_eq!(arena.children(not), &[a]);
    }

    #[test]
    fn test_set_children_checks_arity() {
        let mut arena = FormulaArena::new();
        let a = arena.mk_literal("a", true);
        let b = arena.mk_literal("b", true);
        let imp = arena.mk_implies(a, b);
        let not = arena.mk_not(a);

        assert!(arena.set_children(imp, vec![b, a]).is_ok());
        assert_eq!(arena.children(imp), &[b, a]);
        assert!(matches!(
            arena.set_children(imp, vec![a]),
            Err(FormulaError::StructuralViolation { .. })
        ));
        assert!(arena.set_children(not, vec![a, b]).is_err());
        assert_eq!(arena.children(not), &[a]);
    }

    #[test]
    fn test_predicates_and_constants_are_not_rewritable() {
        let mut arena = FormulaArena::new();
        let a = arena.mk_literal("a", true);
        assert!(arena.set_children(FormulaArena::TRUE, vec![]).is_err());
        assert!(arena.set_children(a, vec![]).is_err());
        assert!(arena.replace_children(FormulaArena::FALSE, |_, _| None).is_err());
        assert_eq!(arena.get(FormulaArena::TRUE), &Node::True);
    }

    #[test]
    fn test_replace_children() {
        let mut arena = FormulaArena::new();
        let a = arena.mk_literal("a", true);
        let b = arena.mk_literal("b", true);
        let or = arena.mk_or([a, b]);
        arena
            .replace_children(or, |arena, c| if c == a { Some(arena.mk_not(c)) } else { None })
            .unwrap();
        assert_eq!(arena.to_boxed(or), Formula::or([Formula::not(Formula::pos("a")), Formula::pos("b")]));
    }

    #[test]
    fn test_flat_replace_children() {
        let mut arena = FormulaArena::new();
        let a = arena.mk_literal("a", true);
        let b = arena.mk_literal("b", true);
        let c = arena.mk_literal("c", true);
        let inner = arena.mk_and([b, c]);
        let outer = arena.mk_and([a, inner, FormulaArena::TRUE]);
        arena
            .flat_replace_children(outer, |arena, child| match arena.get(child) {
                Node::And(cs) => Some(cs.clone()),
                Node::True => Some(vec![]),
                _ => None,
            })
            .unwrap();
        assert_eq!(arena.children(outer), &[a, b, c]);

        let not = arena.mk_not(a);
        assert!(arena.flat_replace_children(not, |_, _| None).is_err());
    }
}
