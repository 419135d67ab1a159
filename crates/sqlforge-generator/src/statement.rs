//! Typed schema-change statements.
//!
//! A statement describes one logical DDL intent. Statements are plain
//! data: immutable once constructed and consumed by a single dispatch.
//! Required fields are checked by generator validation, not at
//! construction, so a statement assembled from partial caller input still
//! reports every missing field at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::SqlValue;

/// Discriminant for [`Statement`], used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Give an existing column a default value.
    AddDefaultValue,
    /// Remove a column's default value.
    DropDefaultValue,
    /// Create a stored procedure.
    CreateProcedure,
    /// Drop a stored procedure.
    DropProcedure,
}

impl StatementKind {
    /// Returns the kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddDefaultValue => "addDefaultValue",
            Self::DropDefaultValue => "dropDefaultValue",
            Self::CreateProcedure => "createProcedure",
            Self::DropProcedure => "dropProcedure",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical schema-change intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Give an existing column a default value.
    AddDefaultValue {
        /// Catalog name.
        catalog: Option<String>,
        /// Schema name.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// The default value to set.
        default_value: SqlValue,
    },

    /// Remove a column's default value.
    DropDefaultValue {
        /// Catalog name.
        catalog: Option<String>,
        /// Schema name.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// Create a stored procedure from caller-supplied source text.
    CreateProcedure {
        /// Catalog name.
        catalog: Option<String>,
        /// Schema name to apply to the procedure.
        schema: Option<String>,
        /// Procedure name, required for replace-if-exists emulation.
        procedure_name: Option<String>,
        /// The full procedure source text.
        procedure_text: Option<String>,
        /// Delimiter the caller used to terminate the body.
        end_delimiter: Option<String>,
        /// Recreate the procedure if it already exists.
        replace_if_exists: Option<bool>,
    },

    /// Drop a stored procedure.
    DropProcedure {
        /// Catalog name.
        catalog: Option<String>,
        /// Schema name.
        schema: Option<String>,
        /// Procedure name.
        procedure_name: String,
    },
}

impl Statement {
    // Convenience constructors

    /// Creates an AddDefaultValue statement.
    #[must_use]
    pub fn add_default_value(
        table: impl Into<String>,
        column: impl Into<String>,
        default_value: SqlValue,
    ) -> Self {
        Self::AddDefaultValue {
            catalog: None,
            schema: None,
            table: table.into(),
            column: column.into(),
            default_value,
        }
    }

    /// Creates a DropDefaultValue statement.
    #[must_use]
    pub fn drop_default_value(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::DropDefaultValue {
            catalog: None,
            schema: None,
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a CreateProcedure statement from procedure source text.
    #[must_use]
    pub fn create_procedure(procedure_text: impl Into<String>) -> Self {
        Self::CreateProcedure {
            catalog: None,
            schema: None,
            procedure_name: None,
            procedure_text: Some(procedure_text.into()),
            end_delimiter: None,
            replace_if_exists: None,
        }
    }

    /// Creates a DropProcedure statement.
    #[must_use]
    pub fn drop_procedure(procedure_name: impl Into<String>) -> Self {
        Self::DropProcedure {
            catalog: None,
            schema: None,
            procedure_name: procedure_name.into(),
        }
    }

    /// Sets the catalog name.
    #[must_use]
    pub fn with_catalog(mut self, name: impl Into<String>) -> Self {
        let catalog = match &mut self {
            Self::AddDefaultValue { catalog, .. }
            | Self::DropDefaultValue { catalog, .. }
            | Self::CreateProcedure { catalog, .. }
            | Self::DropProcedure { catalog, .. } => catalog,
        };
        *catalog = Some(name.into());
        self
    }

    /// Sets the schema name.
    #[must_use]
    pub fn with_schema(mut self, name: impl Into<String>) -> Self {
        let schema = match &mut self {
            Self::AddDefaultValue { schema, .. }
            | Self::DropDefaultValue { schema, .. }
            | Self::CreateProcedure { schema, .. }
            | Self::DropProcedure { schema, .. } => schema,
        };
        *schema = Some(name.into());
        self
    }

    /// Returns the kind tag this statement dispatches under.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::AddDefaultValue { .. } => StatementKind::AddDefaultValue,
            Self::DropDefaultValue { .. } => StatementKind::DropDefaultValue,
            Self::CreateProcedure { .. } => StatementKind::CreateProcedure,
            Self::DropProcedure { .. } => StatementKind::DropProcedure,
        }
    }
}
