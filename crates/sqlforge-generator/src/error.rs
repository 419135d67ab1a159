//! Error types for SQL generation.

use sqlforge_clause::ClauseError;

use crate::dialect::DialectId;
use crate::statement::StatementKind;
use crate::validation::ValidationErrors;

/// Errors that can occur while dispatching and generating SQL.
///
/// A dispatch either returns the complete fragment sequence or one of
/// these; callers never receive a partially constructed result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// The top generator's validation reported one or more violations.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// No registered generator's predicate matched the statement kind and
    /// dialect.
    #[error("no generator supports {kind} statements on dialect '{dialect}'")]
    UnsupportedOperation {
        /// The statement kind that was dispatched.
        kind: StatementKind,
        /// The target dialect.
        dialect: DialectId,
    },

    /// A generator was handed a statement of a kind it does not implement.
    /// Dispatch routes by kind, so this only arises from calling a
    /// generator directly with the wrong statement.
    #[error("generator for {expected} statements received a {actual} statement")]
    StatementMismatch {
        /// The kind the generator implements.
        expected: StatementKind,
        /// The kind it received.
        actual: StatementKind,
    },

    /// A SQL body could not be tokenized for rewriting.
    #[error("malformed SQL: {0}")]
    MalformedSql(#[from] ClauseError),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
