//! Error types for the clause tokenizer.

/// Errors produced while tokenizing SQL text.
///
/// Malformed input is always reported as an error rather than recovered
/// into a best-effort token stream: SQL rewritten from a misparse could
/// corrupt the target schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClauseError {
    /// A string literal was opened but never closed.
    #[error("unterminated string literal starting at byte {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A block comment was opened but never closed.
    #[error("unterminated block comment starting at byte {position}")]
    UnterminatedBlockComment {
        /// Byte offset of the opening `/*`.
        position: usize,
    },
}

/// Result type for tokenizer operations.
pub type Result<T> = std::result::Result<T, ClauseError>;
