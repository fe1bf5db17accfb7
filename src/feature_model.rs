//! Feature models and their translation into propositional constraints.
//!
//! A feature model is a tree of features plus cross-tree constraints. Each
//! feature becomes a Boolean variable named after the feature, and the tree
//! structure becomes a list of constraints:
//!
//! - the root feature is always selected;
//! - in an `And` group, a mandatory child is equivalent to its parent and an
//!   optional child implies its parent;
//! - an `Or` group is selected iff at least one of its children is;
//! - in an `Alternative` group, a child is selected iff its parent is and no
//!   sibling is.
//!
//! # Example
//!
//! ```
//! use formula_rs::feature_model::{Feature, FeatureModel, GroupKind};
//! use formula_rs::formula::Formula;
//!
//! let model = FeatureModel::new(
//!     Feature::new("Car")
//!         .child(Feature::new("Engine").mandatory())
//!         .child(Feature::new("Radio")),
//! )
//! .with_constraint(Formula::implies(Formula::pos("Radio"), Formula::pos("Engine")));
//!
//! let fm = model.to_formula().unwrap();
//! assert_eq!(
//!     fm.formula.to_string(),
//!     "(Car & (Engine <=> Car) & (Radio => Car) & (Radio => Engine))"
//! );
//! ```

use std::collections::HashSet;

use log::debug;

use crate::error::{FormulaError, Result};
use crate::formula::Formula;

/// How the children of a feature are grouped.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum GroupKind {
    /// Children are independent; each is mandatory or optional.
    #[default]
    And,
    /// At least one child.
    Or,
    /// Exactly one child.
    Alternative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub mandatory: bool,
    pub hidden: bool,
    pub group: GroupKind,
    pub children: Vec<Feature>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mandatory: false,
            hidden: false,
            group: GroupKind::And,
            children: Vec::new(),
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn group(mut self, group: GroupKind) -> Self {
        self.group = group;
        self
    }

    pub fn child(mut self, child: Feature) -> Self {
        self.children.push(child);
        self
    }

    pub fn literal(&self) -> Formula {
        Formula::pos(self.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureModel {
    pub root: Option<Feature>,
    /// Cross-tree constraints.
    pub constraints: Vec<Formula>,
}

/// The propositional form of a [`FeatureModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureModelFormula {
    /// Conjunction of all tree and cross-tree constraints.
    pub formula: Formula,
    /// Names of hidden features, in tree order.
    pub hidden_variables: Vec<String>,
    /// Every equivalence generated for mandatory features and groups.
    pub bi_implies: Vec<Formula>,
}

impl FeatureModel {
    pub fn new(root: Feature) -> Self {
        Self {
            root: Some(root),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: Formula) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn add_constraint(&mut self, constraint: Formula) {
        self.constraints.push(constraint);
    }

    /// Translates the model into constraints.
    ///
    /// Fails with [`FormulaError::InputRejected`] if two features share a
    /// name; nothing is produced in that case.
    pub fn to_formula(&self) -> Result<FeatureModelFormula> {
        let mut builder = Builder::default();
        if let Some(root) = &self.root {
            builder.visit(root, None)?;
        }
        let mut constraints = builder.constraints;
        constraints.extend(self.constraints.iter().cloned());

        match constraints.first_mut() {
            None => debug!("feature model without constraints"),
            Some(first) => {
                let childless = matches!(first, Formula::True | Formula::False)
                    || matches!(first, Formula::And(cs) | Formula::Or(cs) if cs.is_empty());
                if childless {
                    *first = Formula::or([]);
                }
            }
        }

        Ok(FeatureModelFormula {
            formula: Formula::and(constraints),
            hidden_variables: builder.hidden_variables,
            bi_implies: builder.bi_implies,
        })
    }
}

#[derive(Default)]
struct Builder {
    names: HashSet<String>,
    constraints: Vec<Formula>,
    hidden_variables: Vec<String>,
    bi_implies: Vec<Formula>,
}

impl Builder {
    fn visit(&mut self, feature: &Feature, parent: Option<&Feature>) -> Result<()> {
        if !self.names.insert(feature.name.clone()) {
            return Err(FormulaError::rejected(format!("duplicate feature name '{}'", feature.name)));
        }
        if feature.hidden || parent.map_or(false, |p| p.hidden) {
            self.hidden_variables.push(feature.name.clone());
        }

        let literal = feature.literal();
        match parent {
            None => self.constraints.push(literal),
            Some(parent) if parent.group == GroupKind::And => {
                if feature.mandatory {
                    self.add_bi_implies(literal, parent.literal(), true);
                } else {
                    self.constraints.push(Formula::implies(literal, parent.literal()));
                }
            }
            Some(_) => {}
        }

        for child in &feature.children {
            self.visit(child, Some(feature))?;
        }

        if feature.children.is_empty() {
            return Ok(());
        }
        let children: Vec<Formula> = feature.children.iter().map(Feature::literal).collect();
        match feature.group {
            GroupKind::And => {}
            GroupKind::Or => {
                self.add_bi_implies(feature.literal(), Formula::or(children), true);
            }
            GroupKind::Alternative => {
                for (i, child) in children.iter().enumerate() {
                    let others = children
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, sibling)| Formula::not(sibling.clone()));
                    let exclusive = Formula::and(others.chain([feature.literal()]));
                    self.add_bi_implies(child.clone(), exclusive, true);
                }
                self.add_bi_implies(feature.literal(), Formula::or(children), false);
            }
        }
        Ok(())
    }

    fn add_bi_implies(&mut self, lhs: Formula, rhs: Formula, as_constraint: bool) {
        let bi_implies = Formula::bi_implies(lhs, rhs);
        if as_constraint {
            self.constraints.push(bi_implies.clone());
        }
        self.bi_implies.push(bi_implies);
    }
}
