use std::backtrace::Backtrace;

use crate::solver::graph::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while building a problem, before any search begins.
///
/// Infeasibility is *not* an error: an unsatisfiable problem is reported as
/// an ordinary `None` result from the engine. Only malformed input reaches
/// this type, and it does so at construction time.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("constraint scope must contain at least two variables, got {0}")]
    ScopeTooSmall(usize),

    #[error("constraint scope mentions variable {0} more than once")]
    DuplicateScopeVariable(VariableId),

    #[error(
        "constraint scope references variable {variable}, but the problem has {variable_count} variables"
    )]
    VariableOutOfRange {
        variable: VariableId,
        variable_count: usize,
    },

    #[error(
        "relation tuple has arity {tuple_arity}, but the constraint scope has arity {scope_arity}"
    )]
    ArityMismatch {
        scope_arity: usize,
        tuple_arity: usize,
    },

    #[error("expected {expected} domains, got {actual}")]
    DomainCountMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
