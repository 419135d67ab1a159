//! Generators that give a column a default value.

use std::sync::Arc;

use crate::dialect::{DialectCapability, DialectId};
use crate::error::{GeneratorError, Result};
use crate::fragment::{AffectedObject, SqlFragment};
use crate::generator::{SqlGenerator, PRIORITY_DEFAULT, PRIORITY_DIALECT};
use crate::registry::GeneratorChain;
use crate::statement::{Statement, StatementKind};
use crate::validation::ValidationErrors;
use crate::value::{DefaultLiteralRenderer, LiteralRenderer};

/// Engine-neutral `ALTER TABLE .. ALTER .. SET DEFAULT` generator.
pub struct AddDefaultValueGenerator {
    renderer: Arc<dyn LiteralRenderer>,
}

impl AddDefaultValueGenerator {
    /// Creates the generator with the built-in literal renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Arc::new(DefaultLiteralRenderer),
        }
    }

    /// Creates the generator with a caller-supplied literal renderer.
    #[must_use]
    pub fn with_renderer(renderer: Arc<dyn LiteralRenderer>) -> Self {
        Self { renderer }
    }
}

impl Default for AddDefaultValueGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlGenerator for AddDefaultValueGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::AddDefaultValue
    }

    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    fn supports(&self, _statement: &Statement, _capability: &DialectCapability) -> bool {
        true
    }

    fn validate(
        &self,
        statement: &Statement,
        _capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Statement::AddDefaultValue { table, column, .. } = statement {
            errors.check_required_text("tableName", table);
            errors.check_required_text("columnName", column);
        } else {
            errors.add_error(format!("expected an {} statement", self.statement_kind()));
        }
        errors
    }

    fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>> {
        let Statement::AddDefaultValue {
            catalog,
            schema,
            table,
            column,
            default_value,
        } = statement
        else {
            return Err(GeneratorError::StatementMismatch {
                expected: self.statement_kind(),
                actual: statement.kind(),
            });
        };
        let sql = format!(
            "ALTER TABLE {} ALTER {} SET DEFAULT {}",
            capability.escape_table_name(catalog.as_deref(), schema.as_deref(), table),
            capability.escape_column_name(column),
            self.renderer.render(default_value, capability),
        );
        Ok(vec![SqlFragment::new(sql).with_affected(
            AffectedObject::column(catalog.clone(), schema.clone(), table, column),
        )])
    }
}

/// Variant for engines that spell the clause `ALTER COLUMN`.
///
/// Selected over the generic generator by priority; only the keyword
/// placement differs. Validation is inherited from the rest of the chain.
pub struct AddDefaultValueAlterColumnGenerator {
    renderer: Arc<dyn LiteralRenderer>,
}

impl AddDefaultValueAlterColumnGenerator {
    /// Creates the generator with the built-in literal renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Arc::new(DefaultLiteralRenderer),
        }
    }

    /// Creates the generator with a caller-supplied literal renderer.
    #[must_use]
    pub fn with_renderer(renderer: Arc<dyn LiteralRenderer>) -> Self {
        Self { renderer }
    }
}

impl Default for AddDefaultValueAlterColumnGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlGenerator for AddDefaultValueAlterColumnGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::AddDefaultValue
    }

    fn priority(&self) -> i32 {
        PRIORITY_DIALECT
    }

    fn specificity(&self) -> u32 {
        1
    }

    fn supports(&self, _statement: &Statement, capability: &DialectCapability) -> bool {
        matches!(capability.id(), DialectId::Postgres | DialectId::MsSql)
    }

    fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>> {
        let Statement::AddDefaultValue {
            catalog,
            schema,
            table,
            column,
            default_value,
        } = statement
        else {
            return Err(GeneratorError::StatementMismatch {
                expected: self.statement_kind(),
                actual: statement.kind(),
            });
        };
        let sql = format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {}",
            capability.escape_table_name(catalog.as_deref(), schema.as_deref(), table),
            capability.escape_column_name(column),
            self.renderer.render(default_value, capability),
        );
        Ok(vec![SqlFragment::new(sql).with_affected(
            AffectedObject::column(catalog.clone(), schema.clone(), table, column),
        )])
    }
}
