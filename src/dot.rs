//! Formula to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Constants** (`true` and `false`) are rendered once, as squares at the bottom (sink rank),
//!   and every parent referring to them points to the same node
//! - **Connectives and quantifiers** are rendered as ellipses, labeled with the operator
//! - **Predicates** (literals, equalities) are rendered as boxes
//! - **Terms** (variables, constants) are rendered as plain text
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//! - **Edges** of ordered binary connectives are labeled with the child slot
//!
//! # Examples
//!
//! ```
//! use formula_rs::arena::FormulaArena;
//! use formula_rs::formula::Formula;
//!
//! let (arena, root) = FormulaArena::from_boxed(&(Formula::pos("a") & Formula::neg("b")));
//! let dot = arena.to_dot(&[root]).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("graph {"));
//! ```

use std::collections::BTreeSet;

use crate::arena::{FormulaArena, Idx, Node, NodeKind};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// ```
/// use formula_rs::dot::DotConfig;
///
/// let config = DotConfig {
///     connective_shape: "circle",
///     ..DotConfig::default()
/// };
/// assert!(config.slot_labels);
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for connective and quantifier nodes (default: "ellipse")
    pub connective_shape: &'static str,
    /// Shape for predicate nodes (default: "box")
    pub predicate_shape: &'static str,
    /// Shape for term nodes (default: "plaintext")
    pub term_shape: &'static str,
    /// Shape for the constants (default: "square")
    pub constant_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for parent-child edges (default: "solid")
    pub edge_style: &'static str,
    /// Whether to label the edges of binary connectives with their slot (default: true)
    pub slot_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            connective_shape: "ellipse",
            predicate_shape: "box",
            term_shape: "plaintext",
            constant_shape: "square",
            root_shape: "rect",
            edge_style: "solid",
            slot_labels: true,
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl FormulaArena {
    /// Nodes reachable from `roots`, in index order.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Idx>) -> BTreeSet<Idx> {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<Idx> = roots.into_iter().collect();
        while let Some(idx) = stack.pop() {
            if visited.insert(idx) {
                stack.extend(self.children(idx).iter().copied());
            }
        }
        visited
    }

    fn dot_label(&self, idx: Idx) -> String {
        let label = match self.get(idx) {
            Node::Literal { name, positive } => format!("{}{}", if *positive { "" } else { "-" }, name),
            Node::Variable(name) => name.clone(),
            Node::Constant(value) => value.to_string(),
            Node::ForAll { variable, .. } => format!("forall {}", variable),
            Node::Exists { variable, .. } => format!("exists {}", variable),
            node => node.name().to_string(),
        };
        escape(&label)
    }

    /// Converts the trees rooted at `roots` to DOT (Graphviz) format.
    ///
    /// All nodes reachable from `roots` are included; shared nodes are displayed once.
    pub fn to_dot(&self, roots: &[Idx]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts the trees rooted at `roots` to DOT format with custom configuration.
    ///
    /// ```
    /// use formula_rs::arena::FormulaArena;
    /// use formula_rs::dot::DotConfig;
    /// use formula_rs::formula::Formula;
    ///
    /// let (arena, root) = FormulaArena::from_boxed(&Formula::implies(Formula::pos("a"), Formula::False));
    /// let config = DotConfig {
    ///     slot_labels: false,
    ///     ..DotConfig::default()
    /// };
    /// let dot = arena.to_dot_with_config(&[root], &config).unwrap();
    /// assert!(!dot.contains("label=\"0\""));
    /// ```
    pub fn to_dot_with_config(&self, roots: &[Idx], config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}];", config.connective_shape)?;

        // Constants
        writeln!(dot, "{{ rank=sink")?;
        for constant in [Self::TRUE, Self::FALSE] {
            writeln!(
                dot,
                "{} [shape={}, label=\"{}\"];",
                constant.index(),
                config.constant_shape,
                self.dot_label(constant)
            )?;
        }
        writeln!(dot, "}}")?;

        let all_nodes = self.descendants(roots.iter().copied());

        for &idx in all_nodes.iter() {
            if self.is_constant(idx) {
                continue;
            }
            let shape = match self.kind(idx) {
                NodeKind::Connective | NodeKind::Quantifier => config.connective_shape,
                NodeKind::Predicate => config.predicate_shape,
                NodeKind::Term => config.term_shape,
            };
            writeln!(dot, "{} [shape={}, label=\"{}\"];", idx.index(), shape, self.dot_label(idx))?;
        }

        for &idx in all_nodes.iter() {
            let ordered = matches!(self.get(idx), Node::Implies(_) | Node::BiImplies(_) | Node::Equals(_));
            for (slot, child) in self.children(idx).iter().enumerate() {
                if ordered && config.slot_labels {
                    writeln!(
                        dot,
                        "{} -- {} [style={}, label=\"{}\"];",
                        idx.index(),
                        child.index(),
                        config.edge_style,
                        slot
                    )?;
                } else {
                    writeln!(dot, "{} -- {} [style={}];", idx.index(), child.index(), config.edge_style)?;
                }
            }
        }

        // Roots at the top
        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root.index())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
