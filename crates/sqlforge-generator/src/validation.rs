//! Aggregated validation results.

use std::fmt;

use crate::dialect::DialectId;

/// Collects every field and flag violation found during validation, so a
/// caller sees all problems at once instead of just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error message.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records an error when a required field is absent.
    pub fn check_required_field<T: ?Sized>(&mut self, field: &str, value: Option<&T>) {
        if value.is_none() {
            self.add_error(format!("{field} is required"));
        }
    }

    /// Records an error when a required text field is blank.
    pub fn check_required_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(format!("{field} is required"));
        }
    }

    /// Records an error when a field is present but not allowed on the
    /// target dialect.
    pub fn check_disallowed_field<T: ?Sized>(
        &mut self,
        field: &str,
        value: Option<&T>,
        dialect: DialectId,
    ) {
        if value.is_some() {
            self.add_error(format!("{field} is not allowed on {dialect}"));
        }
    }

    /// Merges another collection's messages into this one.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// Returns true when no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the recorded messages in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_checks() {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("procedureText", None::<&String>);
        errors.check_required_field("endDelimiter", Some(&";".to_string()));
        assert_eq!(errors.messages(), ["procedureText is required"]);
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let mut errors = ValidationErrors::new();
        errors.check_required_text("tableName", "  ");
        errors.check_required_text("columnName", "active");
        assert_eq!(errors.messages(), ["tableName is required"]);
    }

    #[test]
    fn test_disallowed_field() {
        let mut errors = ValidationErrors::new();
        errors.check_disallowed_field("replaceIfExists", Some(&true), DialectId::Postgres);
        assert_eq!(
            errors.messages(),
            ["replaceIfExists is not allowed on postgres"]
        );
    }

    #[test]
    fn test_all_violations_are_kept() {
        let mut errors = ValidationErrors::new();
        errors.check_required_text("tableName", "");
        errors.check_required_text("columnName", "");
        assert_eq!(errors.messages().len(), 2);
        assert_eq!(
            errors.to_string(),
            "tableName is required; columnName is required"
        );
    }
}
