//! Dispatch-chain behavior: filtering, ranking, gating, delegation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlforge_generator::prelude::*;

/// Test generator with scripted priority, predicate, and validation
/// outcome, counting its `generate` calls.
struct SpyGenerator {
    name: &'static str,
    priority: i32,
    specificity: u32,
    dialect: Option<DialectId>,
    errors: Vec<String>,
    generate_calls: Arc<AtomicUsize>,
}

impl SpyGenerator {
    fn new(name: &'static str, priority: i32) -> Self {
        Self {
            name,
            priority,
            specificity: 0,
            dialect: None,
            errors: Vec::new(),
            generate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn for_dialect(mut self, dialect: DialectId) -> Self {
        self.dialect = Some(dialect);
        self
    }

    fn with_specificity(mut self, specificity: u32) -> Self {
        self.specificity = specificity;
        self
    }

    fn failing(mut self, message: &str) -> Self {
        self.errors.push(message.to_string());
        self
    }

    fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.generate_calls)
    }
}

impl SqlGenerator for SpyGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::AddDefaultValue
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn specificity(&self) -> u32 {
        self.specificity
    }

    fn supports(&self, _statement: &Statement, capability: &DialectCapability) -> bool {
        self.dialect.is_none_or(|dialect| capability.id() == dialect)
    }

    fn validate(
        &self,
        _statement: &Statement,
        _capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for message in &self.errors {
            errors.add_error(message.clone());
        }
        errors
    }

    fn generate(
        &self,
        _statement: &Statement,
        _capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![SqlFragment::new(self.name)])
    }
}

/// Test generator that delegates to the chain and appends its own
/// fragment, exercising composition without inheritance.
struct WrappingGenerator;

impl SqlGenerator for WrappingGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::AddDefaultValue
    }

    fn priority(&self) -> i32 {
        PRIORITY_DIALECT_VARIANT
    }

    fn supports(&self, _statement: &Statement, _capability: &DialectCapability) -> bool {
        true
    }

    fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>> {
        let mut fragments = chain.generate(statement, capability)?;
        fragments.push(SqlFragment::new("wrapper"));
        Ok(fragments)
    }
}

fn statement() -> Statement {
    Statement::add_default_value("users", "active", SqlValue::Bool(true))
}

#[test]
fn test_dialect_specific_generator_wins() {
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(SpyGenerator::new("generic", PRIORITY_DEFAULT)));
    registry.register(Arc::new(
        SpyGenerator::new("mssql", PRIORITY_DIALECT).for_dialect(DialectId::MsSql),
    ));

    let fragments = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::MsSql))
        .unwrap();
    assert_eq!(fragments[0].sql, "mssql");

    let fragments = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::Postgres))
        .unwrap();
    assert_eq!(fragments[0].sql, "generic");
}

#[test]
fn test_resolution_is_deterministic() {
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(SpyGenerator::new("a", PRIORITY_DEFAULT)));
    registry.register(Arc::new(SpyGenerator::new("b", PRIORITY_DIALECT)));
    registry.register(Arc::new(SpyGenerator::new("c", PRIORITY_DEFAULT)));

    let capability = DialectCapability::new(DialectId::Generic);
    let first: Vec<i32> = registry
        .resolve(&statement(), &capability)
        .iter()
        .map(|generator| generator.priority())
        .collect();
    assert_eq!(first, vec![PRIORITY_DIALECT, PRIORITY_DEFAULT, PRIORITY_DEFAULT]);

    for _ in 0..10 {
        let again: Vec<i32> = registry
            .resolve(&statement(), &capability)
            .iter()
            .map(|generator| generator.priority())
            .collect();
        assert_eq!(again, first);
    }
}

#[test]
fn test_specificity_breaks_priority_ties() {
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(SpyGenerator::new("broad", PRIORITY_DIALECT)));
    registry.register(Arc::new(
        SpyGenerator::new("narrow", PRIORITY_DIALECT)
            .for_dialect(DialectId::MySql)
            .with_specificity(1),
    ));

    let fragments = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::MySql))
        .unwrap();
    assert_eq!(fragments[0].sql, "narrow");
}

#[test]
fn test_registration_order_breaks_remaining_ties() {
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(SpyGenerator::new("first", PRIORITY_DEFAULT)));
    registry.register(Arc::new(SpyGenerator::new("second", PRIORITY_DEFAULT)));

    let fragments = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::Generic))
        .unwrap();
    assert_eq!(fragments[0].sql, "first");
}

#[test]
fn test_generate_is_never_called_when_validation_fails() {
    let failing = SpyGenerator::new("failing", PRIORITY_DIALECT).failing("tableName is required");
    let calls = failing.calls();
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(failing));

    let err = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::Generic))
        .unwrap_err();
    match err {
        GeneratorError::ValidationFailed(errors) => {
            assert_eq!(errors.messages(), ["tableName is required"]);
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unsupported_kind_and_dialect() {
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(
        SpyGenerator::new("mssql-only", PRIORITY_DIALECT).for_dialect(DialectId::MsSql),
    ));

    let err = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::Oracle))
        .unwrap_err();
    assert_eq!(
        err,
        GeneratorError::UnsupportedOperation {
            kind: StatementKind::AddDefaultValue,
            dialect: DialectId::Oracle,
        }
    );
}

#[test]
fn test_chain_delegation_composes_fragments() {
    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(SpyGenerator::new("inner", PRIORITY_DEFAULT)));
    registry.register(Arc::new(WrappingGenerator));

    let fragments = registry
        .dispatch(&statement(), &DialectCapability::new(DialectId::Generic))
        .unwrap();
    let sql: Vec<&str> = fragments.iter().map(|f| f.sql.as_str()).collect();
    assert_eq!(sql, ["inner", "wrapper"]);
}

#[test]
fn test_fragment_order_is_preserved() {
    struct MultiFragmentGenerator;

    impl SqlGenerator for MultiFragmentGenerator {
        fn statement_kind(&self) -> StatementKind {
            StatementKind::DropProcedure
        }

        fn priority(&self) -> i32 {
            PRIORITY_DEFAULT
        }

        fn supports(&self, _statement: &Statement, _capability: &DialectCapability) -> bool {
            true
        }

        fn generate(
            &self,
            _statement: &Statement,
            _capability: &DialectCapability,
            _chain: &GeneratorChain<'_>,
        ) -> Result<Vec<SqlFragment>> {
            Ok(vec![
                SqlFragment::new("one"),
                SqlFragment::new("two"),
                SqlFragment::new("three"),
            ])
        }
    }

    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(MultiFragmentGenerator));

    let fragments = registry
        .dispatch(
            &Statement::drop_procedure("p"),
            &DialectCapability::new(DialectId::Generic),
        )
        .unwrap();
    let sql: Vec<&str> = fragments.iter().map(|f| f.sql.as_str()).collect();
    assert_eq!(sql, ["one", "two", "three"]);
}
