//! Error and diagnostic types.
//!
//! Fallible operations return [`Result`]. Lossy conversions that succeed with
//! caveats return a [`Diagnosed`] value carrying a list of [`Problem`]s.

use std::fmt;

use thiserror::Error;

use crate::arena::Idx;

/// Result type for formula operations.
pub type Result<T> = std::result::Result<T, FormulaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// A variable index is absent from a variable map.
    #[error("no variable with index {index}")]
    MissingIndex { index: u32 },

    /// A variable name is absent from a variable map.
    #[error("no variable named {name}")]
    MissingName { name: String },

    /// A traversal or rewrite met a node it cannot handle.
    #[error("structural violation at {node}: {message}")]
    StructuralViolation { node: Idx, message: String },

    /// Input was rejected as a whole (e.g. duplicate feature names).
    #[error("input rejected: {message}")]
    InputRejected { message: String },
}

impl FormulaError {
    pub fn structural(node: Idx, message: impl Into<String>) -> Self {
        FormulaError::StructuralViolation {
            node,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        FormulaError::InputRejected {
            message: message.into(),
        }
    }

    /// Converts the error into an error-severity [`Problem`].
    pub fn problem(&self) -> Problem {
        Problem::error(self.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A structured diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub severity: Severity,
    pub message: String,
}

impl Problem {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A value produced together with the problems met while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub problems: Vec<Problem>,
}

impl<T> Diagnosed<T> {
    pub fn new(value: T, problems: Vec<Problem>) -> Self {
        Self { value, problems }
    }

    pub fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Whether any problem is at least a warning.
    pub fn has_warnings(&self) -> bool {
        self.problems.iter().any(|p| p.severity >= Severity::Warning)
    }

    pub fn map<U, F>(self, f: F) -> Diagnosed<U>
    where
        F: FnOnce(T) -> U,
    {
        Diagnosed {
            value: f(self.value),
            problems: self.problems,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
