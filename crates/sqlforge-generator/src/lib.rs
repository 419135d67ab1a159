//! Dialect-aware SQL generation for schema-change statements.
//!
//! `sqlforge-generator` turns abstract, engine-neutral descriptions of a
//! schema change into SQL text for a specific target engine. Engines
//! disagree on syntax, session semantics, and idempotency idioms for the
//! same logical operation; competing generators register for the same
//! statement kind and the registry picks the most specific one applicable
//! to the requested dialect.
//!
//! # Architecture
//!
//! - **Statements** - immutable, typed descriptions of one logical change
//! - **Dialect capabilities** - identity tag, escaping rules, default
//!   schema, and named flags for one target engine
//! - **Generators** - per-kind SQL producers, ranked by priority and
//!   chained for composition
//! - **Registry** - capability-filtered, priority-ranked dispatch
//! - **Fragments** - ordered output SQL with terminators and
//!   affected-object tags
//!
//! # Example
//!
//! ```
//! use sqlforge_generator::prelude::*;
//!
//! let registry = GeneratorRegistry::with_builtin_generators();
//! let statement = Statement::add_default_value("users", "active", SqlValue::Bool(true));
//! let capability = DialectCapability::new(DialectId::Generic);
//!
//! let fragments = registry.dispatch(&statement, &capability)?;
//! assert_eq!(fragments[0].sql, "ALTER TABLE users ALTER active SET DEFAULT TRUE");
//! # Ok::<(), GeneratorError>(())
//! ```

pub mod dialect;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod registry;
pub mod statement;
pub mod validation;
pub mod value;

pub use error::{GeneratorError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialect::{flags, DialectCapability, DialectId};
    pub use crate::error::{GeneratorError, Result};
    pub use crate::fragment::{AffectedObject, SqlFragment};
    pub use crate::generator::{
        AddDefaultValueAlterColumnGenerator, AddDefaultValueGenerator, CreateProcedureGenerator,
        DropDefaultValueGenerator, DropProcedureGenerator, SqlGenerator, PRIORITY_DEFAULT,
        PRIORITY_DIALECT, PRIORITY_DIALECT_VARIANT,
    };
    pub use crate::registry::{GeneratorChain, GeneratorRegistry};
    pub use crate::statement::{Statement, StatementKind};
    pub use crate::validation::ValidationErrors;
    pub use crate::value::{DefaultLiteralRenderer, LiteralRenderer, SqlValue};
}
