//! SQL literal values and dialect-aware rendering.

use serde::{Deserialize, Serialize};

use crate::dialect::{DialectCapability, DialectId};

/// A literal value carried by a statement, typed by inference from the
/// caller's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Integer(i64),
    /// Floating point.
    Float(f64),
    /// A character string, quoted on render.
    String(String),
    /// A raw SQL expression (e.g. `CURRENT_TIMESTAMP`), rendered verbatim.
    Expression(String),
}

/// Maps a value to its SQL literal text for a target dialect.
///
/// Value-bearing generators hold a renderer, so callers can swap in their
/// own type mappings.
pub trait LiteralRenderer: Send + Sync {
    /// Renders `value` as literal SQL text for the target engine.
    fn render(&self, value: &SqlValue, capability: &DialectCapability) -> String;
}

/// The built-in renderer, keyed by value type and dialect identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLiteralRenderer;

impl LiteralRenderer for DefaultLiteralRenderer {
    fn render(&self, value: &SqlValue, capability: &DialectCapability) -> String {
        match value {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(value) => render_bool(*value, capability.id()),
            SqlValue::Integer(value) => value.to_string(),
            SqlValue::Float(value) => value.to_string(),
            SqlValue::String(value) => format!("'{}'", value.replace('\'', "''")),
            SqlValue::Expression(expression) => expression.clone(),
        }
    }
}

/// Engines without a boolean type store booleans as 0/1.
fn render_bool(value: bool, dialect: DialectId) -> String {
    match dialect {
        DialectId::Generic | DialectId::Postgres => {
            if value { "TRUE" } else { "FALSE" }.to_string()
        }
        DialectId::MySql | DialectId::MsSql | DialectId::Oracle | DialectId::Db2 => {
            if value { "1" } else { "0" }.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &SqlValue, dialect: DialectId) -> String {
        DefaultLiteralRenderer.render(value, &DialectCapability::new(dialect))
    }

    #[test]
    fn test_bool_rendering_per_dialect() {
        assert_eq!(render(&SqlValue::Bool(true), DialectId::Generic), "TRUE");
        assert_eq!(render(&SqlValue::Bool(false), DialectId::Postgres), "FALSE");
        assert_eq!(render(&SqlValue::Bool(true), DialectId::MySql), "1");
        assert_eq!(render(&SqlValue::Bool(false), DialectId::MsSql), "0");
    }

    #[test]
    fn test_string_quotes_are_doubled() {
        assert_eq!(
            render(
                &SqlValue::String("it's".to_string()),
                DialectId::Generic
            ),
            "'it''s'"
        );
    }

    #[test]
    fn test_numbers_and_null() {
        assert_eq!(render(&SqlValue::Integer(42), DialectId::Generic), "42");
        assert_eq!(render(&SqlValue::Float(2.5), DialectId::Generic), "2.5");
        assert_eq!(render(&SqlValue::Null, DialectId::Generic), "NULL");
    }

    #[test]
    fn test_expression_is_verbatim() {
        assert_eq!(
            render(
                &SqlValue::Expression("CURRENT_TIMESTAMP".to_string()),
                DialectId::Oracle
            ),
            "CURRENT_TIMESTAMP"
        );
    }
}
