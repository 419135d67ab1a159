//! Stored-procedure creation.
//!
//! The highest-touch generator in the crate: the caller hands over
//! already-written procedure source, and dialect capabilities and flags
//! decide how much of it gets rewritten before emission.

use sqlforge_clause::{contains_bare_keyword, strip_trailing_delimiter, ClauseSequence, TokenKind};
use tracing::debug;

use crate::dialect::{flags, DialectCapability};
use crate::error::{GeneratorError, Result};
use crate::fragment::SqlFragment;
use crate::generator::{SqlGenerator, PRIORITY_DEFAULT};
use crate::registry::GeneratorChain;
use crate::statement::{Statement, StatementKind};
use crate::validation::ValidationErrors;

/// Emits a stored procedure from caller-supplied source text.
pub struct CreateProcedureGenerator;

impl SqlGenerator for CreateProcedureGenerator {
    fn statement_kind(&self) -> StatementKind {
        StatementKind::CreateProcedure
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
        capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let Statement::CreateProcedure {
            procedure_name,
            procedure_text,
            replace_if_exists,
            ..
        } = statement
        else {
            errors.add_error(format!("expected a {} statement", self.statement_kind()));
            return errors;
        };
        errors.check_required_field("procedureText", procedure_text.as_ref());
        if let Some(replace) = replace_if_exists {
            if capability.supports_replace_if_exists() {
                if *replace && procedure_name.is_none() {
                    errors.add_error("procedureName is required when replaceIfExists is set");
                }
            } else {
                errors.check_disallowed_field("replaceIfExists", Some(replace), capability.id());
            }
        }
        errors
    }

    fn generate(
        &self,
        statement: &Statement,
        capability: &DialectCapability,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<SqlFragment>> {
        let Statement::CreateProcedure {
            schema,
            procedure_name,
            procedure_text,
            end_delimiter,
            replace_if_exists,
            ..
        } = statement
        else {
            return Err(GeneratorError::StatementMismatch {
                expected: self.statement_kind(),
                actual: statement.kind(),
            });
        };
        let Some(procedure_text) = procedure_text else {
            return Err(GeneratorError::ValidationFailed(required("procedureText")));
        };

        let effective_schema = schema.clone().or_else(|| {
            if capability.flag(flags::ALWAYS_OVERRIDE_STORED_LOGIC_SCHEMA) {
                capability.default_schema().map(str::to_string)
            } else {
                None
            }
        });

        let mut body = add_schema_to_text(
            procedure_text,
            effective_schema.as_deref(),
            "PROCEDURE",
            capability,
        )?;
        let mut fragments = Vec::new();

        if matches!(replace_if_exists, Some(true)) {
            let Some(name) = procedure_name else {
                return Err(GeneratorError::ValidationFailed(required("procedureName")));
            };
            let mut qualified = capability.escape_object_name(name);
            if let Some(schema) = &effective_schema {
                qualified = format!("{}.{qualified}", capability.escape_schema_name(schema));
            }
            fragments.push(SqlFragment::new(format!(
                "if object_id('{qualified}', 'p') is null exec ('create procedure {qualified} as select 1 a')"
            )));
            body = rewrite_create_to_alter(&body)?;
        }

        if let Some(delimiter) = end_delimiter {
            body = strip_trailing_delimiter(&body, delimiter);
        }

        // merge procedures need a trailing ; regardless of the end delimiter
        if capability.requires_merge_terminator()
            && body.to_lowercase().contains("merge")
            && !body.ends_with(';')
            && contains_bare_keyword(&body, "merge")?
        {
            body.push(';');
        }

        let mut fragment = SqlFragment::new(body);
        if let Some(delimiter) = end_delimiter {
            fragment = fragment.with_end_delimiter(delimiter.clone());
        }
        fragments.push(fragment);

        surround_with_schema_sets(&mut fragments, schema.as_deref(), capability);
        Ok(fragments)
    }
}

fn required(field: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add_error(format!("{field} is required"));
    errors
}

/// Writes `schema` into the object name following `keyword_before_name` in
/// already-written SQL text, when the `useProcedureSchema` flag asks for
/// in-body qualification.
///
/// Handles 1-, 2-, and 3-part dotted names: the schema segment is inserted
/// or replaced, and the catalog segment of a 3-part name is preserved. A
/// `PACKAGE` construct ahead of the keyword aborts the rewrite, leaving
/// the text untouched. Shared with other stored-logic generators.
///
/// # Errors
///
/// Returns [`GeneratorError::MalformedSql`] when the text is not
/// tokenizable.
pub fn add_schema_to_text(
    text: &str,
    schema: Option<&str>,
    keyword_before_name: &str,
    capability: &DialectCapability,
) -> Result<String> {
    let Some(schema) = schema.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(text.to_string());
    };
    if !capability.flag(flags::USE_PROCEDURE_SCHEMA) {
        return Ok(text.to_string());
    }

    let mut clauses = ClauseSequence::parse(text)?;
    let mut cursor = clauses.cursor();
    loop {
        let Some(token) = cursor.next_significant() else {
            return Ok(text.to_string());
        };
        if !keyword_before_name.eq_ignore_ascii_case("PACKAGE") && token.is_word("PACKAGE") {
            debug!("package construct found, leaving stored-logic body unqualified");
            return Ok(text.to_string());
        }
        if token.is_word(keyword_before_name) {
            break;
        }
    }
    let (name, is_word) = match cursor.next_significant() {
        Some(token) => (token.text.clone(), token.kind == TokenKind::Word),
        None => return Ok(text.to_string()),
    };
    if !is_word {
        return Ok(text.to_string());
    }

    let escaped_schema = capability.escape_schema_name(schema);
    let parts: Vec<&str> = name.split('.').collect();
    let qualified = match parts.as_slice() {
        [bare] => format!("{escaped_schema}.{bare}"),
        [_, object] => format!("{escaped_schema}.{object}"),
        [catalog, _, object] => format!("{catalog}.{escaped_schema}.{object}"),
        _ => name.clone(),
    };
    cursor.replace_current(qualified);
    Ok(clauses.to_string())
}

/// Rewrites the body's leading creation keyword to `ALTER` so the
/// statement succeeds against the placeholder created by the existence
/// probe. Bodies with no creation keyword are left unchanged.
fn rewrite_create_to_alter(body: &str) -> Result<String> {
    let mut clauses = ClauseSequence::parse(body)?;
    let mut cursor = clauses.cursor();
    loop {
        let Some(token) = cursor.next_significant() else {
            return Ok(body.to_string());
        };
        if token.is_word("create") || token.is_word("alter") {
            break;
        }
    }
    cursor.replace_current("ALTER");
    Ok(clauses.to_string())
}

/// Wraps the emitted fragments in session schema switches for dialects
/// that expose one, when the schema is not written into the body itself.
/// The trailing switch restores the dialect's default schema and is
/// omitted when no default schema is known.
pub fn surround_with_schema_sets(
    fragments: &mut Vec<SqlFragment>,
    schema: Option<&str>,
    capability: &DialectCapability,
) {
    let Some(schema) = schema.map(str::trim).filter(|s| !s.is_empty()) else {
        return;
    };
    if capability.flag(flags::USE_PROCEDURE_SCHEMA) {
        return;
    }
    let Some(set_statement) = capability.session_schema_statement(schema) else {
        return;
    };
    fragments.insert(0, SqlFragment::new(set_statement));
    if let Some(restore) = capability
        .default_schema()
        .and_then(|default| capability.session_schema_statement(default))
    {
        fragments.push(SqlFragment::new(restore));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectId;

    fn qualifying_capability(id: DialectId) -> DialectCapability {
        DialectCapability::new(id).with_flag(flags::USE_PROCEDURE_SCHEMA, true)
    }

    #[test]
    fn test_one_part_name_gains_schema() {
        let text = "create procedure foo as select 1";
        let result = add_schema_to_text(
            text,
            Some("app"),
            "PROCEDURE",
            &qualifying_capability(DialectId::Generic),
        )
        .unwrap();
        assert_eq!(result, "create procedure app.foo as select 1");
    }

    #[test]
    fn test_two_part_name_schema_is_replaced() {
        let text = "create procedure old.foo as select 1";
        let result = add_schema_to_text(
            text,
            Some("app"),
            "PROCEDURE",
            &qualifying_capability(DialectId::Generic),
        )
        .unwrap();
        assert_eq!(result, "create procedure app.foo as select 1");
    }

    #[test]
    fn test_three_part_name_keeps_catalog() {
        let text = "create procedure link.sch.foo as select 1";
        let result = add_schema_to_text(
            text,
            Some("app"),
            "PROCEDURE",
            &qualifying_capability(DialectId::Generic),
        )
        .unwrap();
        assert_eq!(result, "create procedure link.app.foo as select 1");
    }

    #[test]
    fn test_package_aborts_qualification() {
        let text = "create package body foo as procedure bar is begin null; end";
        let result = add_schema_to_text(
            text,
            Some("app"),
            "PROCEDURE",
            &qualifying_capability(DialectId::Oracle),
        )
        .unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_flag_unset_leaves_text_untouched() {
        let text = "create procedure foo as select 1";
        let result = add_schema_to_text(
            text,
            Some("app"),
            "PROCEDURE",
            &DialectCapability::new(DialectId::Generic),
        )
        .unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_formatting_survives_qualification() {
        let text = "create   /* keep */ procedure\n\tfoo\nas select 1 -- tail";
        let result = add_schema_to_text(
            text,
            Some("app"),
            "PROCEDURE",
            &qualifying_capability(DialectId::Generic),
        )
        .unwrap();
        assert_eq!(result, "create   /* keep */ procedure\n\tapp.foo\nas select 1 -- tail");
    }

    #[test]
    fn test_rewrite_create_to_alter() {
        assert_eq!(
            rewrite_create_to_alter("CREATE procedure foo as select 1").unwrap(),
            "ALTER procedure foo as select 1"
        );
        assert_eq!(
            rewrite_create_to_alter("-- note\ncreate procedure foo").unwrap(),
            "-- note\nALTER procedure foo"
        );
    }

    #[test]
    fn test_rewrite_without_creation_keyword_is_unchanged() {
        assert_eq!(
            rewrite_create_to_alter("select 1 from dual").unwrap(),
            "select 1 from dual"
        );
    }

    #[test]
    fn test_schema_sets_skipped_without_capability() {
        let mut fragments = vec![SqlFragment::new("body")];
        surround_with_schema_sets(
            &mut fragments,
            Some("app"),
            &DialectCapability::new(DialectId::Postgres),
        );
        assert_eq!(fragments.len(), 1);
    }

    #[test]
    fn test_schema_sets_wrap_on_oracle() {
        let mut fragments = vec![SqlFragment::new("body")];
        surround_with_schema_sets(
            &mut fragments,
            Some("app"),
            &DialectCapability::new(DialectId::Oracle).with_default_schema("main"),
        );
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].sql, "ALTER SESSION SET CURRENT_SCHEMA=app");
        assert_eq!(fragments[1].sql, "body");
        assert_eq!(fragments[2].sql, "ALTER SESSION SET CURRENT_SCHEMA=main");
    }

    #[test]
    fn test_restore_omitted_without_default_schema() {
        let mut fragments = vec![SqlFragment::new("body")];
        surround_with_schema_sets(
            &mut fragments,
            Some("app"),
            &DialectCapability::new(DialectId::Oracle),
        );
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].sql, "ALTER SESSION SET CURRENT_SCHEMA=app");
    }
}
