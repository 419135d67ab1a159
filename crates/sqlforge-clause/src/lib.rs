//! Lossless SQL clause tokenizer and rewriter.
//!
//! `sqlforge-clause` splits arbitrary SQL text into an ordered sequence of
//! tokens (words, string literals, comments, whitespace, punctuation) such
//! that concatenating the raw text of the tokens reconstructs the input
//! exactly. A [`ClauseCursor`] then supports surgical, index-targeted
//! edits of a single token while every other byte of the text (formatting,
//! comments, string contents) survives untouched.
//!
//! This is the machinery used to rewrite already-written SQL bodies, e.g.
//! injecting a schema qualifier into a stored-procedure definition or
//! swapping a leading `CREATE` for `ALTER`.
//!
//! # Example
//!
//! ```
//! use sqlforge_clause::ClauseSequence;
//!
//! let mut clauses = ClauseSequence::parse("create procedure foo as select 1")?;
//! let mut cursor = clauses.cursor();
//! while let Some(token) = cursor.next_significant() {
//!     if token.is_word("foo") {
//!         break;
//!     }
//! }
//! cursor.replace_current("app.foo");
//! assert_eq!(clauses.to_string(), "create procedure app.foo as select 1");
//! # Ok::<(), sqlforge_clause::ClauseError>(())
//! ```

pub mod cursor;
pub mod error;
pub mod scan;
pub mod token;
pub mod tokenizer;

pub use cursor::ClauseCursor;
pub use error::{ClauseError, Result};
pub use scan::{contains_bare_keyword, strip_trailing_delimiter};
pub use token::{Token, TokenKind};
pub use tokenizer::{ClauseSequence, ClauseTokenizer};
