//! SQL generators.
//!
//! Each generator implements one statement kind for a capability
//! predicate. Multiple generators may register for the same kind; the
//! registry ranks them by priority and the winner may delegate shared
//! logic to the rest of the chain.

mod add_default_value;
mod create_procedure;
mod drop_default_value;
mod drop_procedure;

pub use add_default_value::{AddDefaultValueAlterColumnGenerator, AddDefaultValueGenerator};
pub use create_procedure::{add_schema_to_text, surround_with_schema_sets, CreateProcedureGenerator};
pub use drop_default_value::DropDefaultValueGenerator;
pub use drop_procedure::DropProcedureGenerator;

use crate::dialect::DialectCapability;
use crate::error::Result;
use crate::fragment::SqlFragment;
use crate::registry::GeneratorChain;
use crate::statement::{Statement, StatementKind};
use crate::validation::ValidationErrors;

/// Priority of engine-neutral generators.
pub const PRIORITY_DEFAULT: i32 = 1;

/// Priority of engine-specific generators, overriding the generic tier.
pub const PRIORITY_DIALECT: i32 = 5;

/// Priority of variants that further specialize an engine-specific
/// generator.
pub const PRIORITY_DIALECT_VARIANT: i32 = 10;

/// A unit that produces SQL for one statement kind under a capability
/// predicate.
pub trait SqlGenerator: Send + Sync {
    /// The statement kind this generator implements; the registry key.
    fn statement_kind(&self) -> StatementKind;

    /// Ranking within the chain; higher is more specific.
    fn priority(&self) -> i32;

    /// Tie-break score among equal priorities. Predicates over a narrower
    /// condition should declare a higher score.
    fn specificity(&self) -> u32 {
        0
    }

    /// Capability predicate: can this generator produce SQL for the given
    /// statement on the given engine?
    fn supports(&self, statement: &Statement, capability: &DialectCapability) -> bool;

    /// Checks the statement's fields and flags against the target dialect.
    ///
    /// The default delegates down the chain, so a variant inherits the
    /// checks of the generator it overrides.
    fn validate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        chain: &GeneratorChain<'_>,
    ) -> ValidationErrors {
        chain.validate(statement, capability)
    }

    /// Produces the ordered SQL fragments for the statement.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeneratorError`] when required fields are missing
    /// or a SQL body cannot be rewritten.
    fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>>;
}
