//! Generator that drops a stored procedure.

use crate::dialect::DialectCapability;
use crate::error::{GeneratorError, Result};
use crate::fragment::{AffectedObject, SqlFragment};
use crate::generator::{SqlGenerator, PRIORITY_DEFAULT};
use crate::registry::GeneratorChain;
use crate::statement::{Statement, StatementKind};
use crate::validation::ValidationErrors;

/// Engine-neutral `DROP PROCEDURE` generator.
pub struct DropProcedureGenerator;

impl SqlGenerator for DropProcedureGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::DropProcedure
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
        if let Statement::DropProcedure { procedure_name, .. } = statement {
            errors.check_required_text("procedureName", procedure_name);
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
        let Statement::DropProcedure {
            catalog,
            schema,
            procedure_name,
        } = statement
        else {
            return Err(GeneratorError::StatementMismatch {
                expected: self.statement_kind(),
                actual: statement.kind(),
            });
        };
        let sql = format!(
            "DROP PROCEDURE {}",
            capability.escape_qualified_name(
                catalog.as_deref(),
                schema.as_deref(),
                procedure_name
            ),
        );
        Ok(vec![SqlFragment::new(sql).with_affected(
            AffectedObject::stored_object(schema.clone(), procedure_name),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectId;

    #[test]
    fn test_drop_procedure() {
        let statement = Statement::drop_procedure("sync_users").with_schema("app");
        let capability = DialectCapability::new(DialectId::Generic);

        let fragments = DropProcedureGenerator
            .generate(&statement, &capability, &GeneratorChain::new(&[]))
            .unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].sql, "DROP PROCEDURE app.sync_users");
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let statement = Statement::drop_procedure("  ");
        let capability = DialectCapability::new(DialectId::Generic);

        let errors =
            DropProcedureGenerator.validate(&statement, &capability, &GeneratorChain::new(&[]));
        assert_eq!(errors.messages(), ["procedureName is required"]);
    }
}
