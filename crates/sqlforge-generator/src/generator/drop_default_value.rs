//! Generator that removes a column's default value.

use crate::dialect::DialectCapability;
use crate::error::{GeneratorError, Result};
use crate::fragment::{AffectedObject, SqlFragment};
use crate::generator::{SqlGenerator, PRIORITY_DEFAULT};
use crate::registry::GeneratorChain;
use crate::statement::{Statement, StatementKind};
use crate::validation::ValidationErrors;

/// Engine-neutral `ALTER TABLE .. ALTER .. DROP DEFAULT` generator.
pub struct DropDefaultValueGenerator;

impl SqlGenerator for DropDefaultValueGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::DropDefaultValue
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
        if let Statement::DropDefaultValue { table, column, .. } = statement {
            errors.check_required_text("tableName", table);
            errors.check_required_text("columnName", column);
        } else {
            errors.add_error(format!("expected a {} statement", self.statement_kind()));
        }
        errors
    }

    fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>> {
        let Statement::DropDefaultValue {
            catalog,
            schema,
            table,
            column,
        } = statement
        else {
            return Err(GeneratorError::StatementMismatch {
                expected: self.statement_kind(),
                actual: statement.kind(),
            });
        };
        let sql = format!(
            "ALTER TABLE {} ALTER {} DROP DEFAULT",
            capability.escape_table_name(catalog.as_deref(), schema.as_deref(), table),
            capability.escape_column_name(column),
        );
        Ok(vec![SqlFragment::new(sql).with_affected(
            AffectedObject::column(catalog.clone(), schema.clone(), table, column),
        )])
    }
}
