//! Generator registration and priority-ranked dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::dialect::DialectCapability;
use crate::error::{GeneratorError, Result};
use crate::fragment::SqlFragment;
use crate::generator::{
    AddDefaultValueAlterColumnGenerator, AddDefaultValueGenerator, CreateProcedureGenerator,
    DropDefaultValueGenerator, DropProcedureGenerator, SqlGenerator,
};
use crate::statement::{Statement, StatementKind};
use crate::validation::ValidationErrors;

/// The next-lower-priority generators applicable to a statement.
///
/// A generator receives the remainder of its chain and may delegate
/// shared logic downward; composition replaces the inheritance hierarchy
/// a subclass-based design would use.
pub struct GeneratorChain<'a> {
    tail: &'a [Arc<dyn SqlGenerator>],
}

impl<'a> GeneratorChain<'a> {
    /// Creates a chain over the given generators, most specific first.
    #[must_use]
    pub fn new(tail: &'a [Arc<dyn SqlGenerator>]) -> Self {
        Self { tail }
    }

    /// Returns true when no generators remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// Returns the number of remaining generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tail.len()
    }

    /// Validates with the next generator in the chain; an exhausted chain
    /// reports no errors.
    pub fn validate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
    ) -> ValidationErrors {
        match self.tail.split_first() {
            Some((head, rest)) => head.validate(statement, capability, &Self::new(rest)),
            None => ValidationErrors::new(),
        }
    }

    /// Generates with the next generator in the chain; an exhausted chain
    /// emits no fragments.
    ///
    /// # Errors
    ///
    /// Propagates whatever the delegated generator returns.
    pub fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
    ) -> Result<Vec<SqlFragment>> {
        match self.tail.split_first() {
            Some((head, rest)) => head.generate(statement, capability, &Self::new(rest)),
            None => Ok(Vec::new()),
        }
    }
}

/// Holds registered generators and drives validation and generation.
///
/// Registration takes `&mut self` and resolution takes `&self`, so the
/// borrow system enforces that registration happens before the first
/// resolution. A populated registry behind an `Arc` is safe for
/// concurrent read-only dispatch from independent migration runs.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<StatementKind, Vec<Arc<dyn SqlGenerator>>>,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the built-in generators.
    #[must_use]
    pub fn with_builtin_generators() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AddDefaultValueGenerator::new()));
        registry.register(Arc::new(AddDefaultValueAlterColumnGenerator::new()));
        registry.register(Arc::new(DropDefaultValueGenerator));
        registry.register(Arc::new(CreateProcedureGenerator));
        registry.register(Arc::new(DropProcedureGenerator));
        registry
    }

    /// Registers a generator under its statement kind.
    pub fn register(&mut self, generator: Arc<dyn SqlGenerator>) {
        self.generators
            .entry(generator.statement_kind())
            .or_default()
            .push(generator);
    }

    /// Resolves the ordered chain of generators applicable to a statement
    /// on a dialect.
    ///
    /// Ordering is deterministic: priority descending, then declared
    /// specificity descending, then registration order. Repeated calls
    /// over an unchanged registry return the identical list.
    #[must_use]
    pub fn resolve(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
    ) -> Vec<Arc<dyn SqlGenerator>> {
        let Some(registered) = self.generators.get(&statement.kind()) else {
            return Vec::new();
        };
        let mut applicable: Vec<(usize, &Arc<dyn SqlGenerator>)> = registered
            .iter()
            .enumerate()
            .filter(|(_, generator)| generator.supports(statement, capability))
            .collect();
        applicable.sort_by(|a, b| {
            b.1.priority()
                .cmp(&a.1.priority())
                .then_with(|| b.1.specificity().cmp(&a.1.specificity()))
                .then_with(|| a.0.cmp(&b.0))
        });
        applicable
            .into_iter()
            .map(|(_, generator)| Arc::clone(generator))
            .collect()
    }

    /// Resolves the chain for a statement and drives validation and
    /// generation.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::UnsupportedOperation`] when no generator applies,
    /// [`GeneratorError::ValidationFailed`] when the top generator reports
    /// violations (generation is never attempted in that case), or any
    /// error the generator itself produces.
    pub fn dispatch(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
    ) -> Result<Vec<SqlFragment>> {
        let chain = self.resolve(statement, capability);
        let Some((head, tail)) = chain.split_first() else {
            return Err(GeneratorError::UnsupportedOperation {
                kind: statement.kind(),
                dialect: capability.id(),
            });
        };
        debug!(
            kind = %statement.kind(),
            dialect = %capability.id(),
            generators = chain.len(),
            "resolved generator chain"
        );
        let tail = GeneratorChain::new(tail);
        let errors = head.validate(statement, capability, &tail);
        if !errors.is_empty() {
            return Err(GeneratorError::ValidationFailed(errors));
        }
        head.generate(statement, capability, &tail)
    }
}
