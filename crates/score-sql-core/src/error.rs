//! Error types for statement compilation.

use thiserror::Error;

use crate::builder::StatementKind;
use crate::dialect::Dialect;

/// Errors that abort the compilation of a statement.
///
/// No partial SQL text is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A predicate used an operator keyword that is not recognised.
    #[error("unsupported relation: {0}")]
    UnsupportedRelation(String),

    /// BETWEEN was given a number of values other than two.
    #[error("BETWEEN on '{column}' needs exactly two values, got {count}")]
    MalformedBetween {
        /// Column of the predicate.
        column: String,
        /// Number of values supplied.
        count: usize,
    },

    /// A predicate needs a bound value but no binder was supplied.
    #[error("predicate on '{column}' needs a binder to hold its value")]
    MissingBindConfiguration {
        /// Column of the predicate.
        column: String,
    },

    /// A clause the selected dialect cannot express.
    #[error("{clause} is not available for the {dialect} dialect")]
    UnimplementedClause {
        /// The clause keyword, e.g. `FOR UPDATE`.
        clause: &'static str,
        /// The dialect in effect.
        dialect: Dialect,
    },

    /// INSERT or UPDATE was compiled from an empty value map.
    #[error("{statement} needs at least one column value")]
    MissingValues {
        /// The statement being compiled.
        statement: StatementKind,
    },

    /// Compiler configuration could not be read.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
