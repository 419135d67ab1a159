//! Target engine capability records.
//!
//! A [`DialectCapability`] replaces "is this database an instance of X"
//! checks with a record carrying an explicit identity tag, escaping rules,
//! a default schema, and named flags. Generator predicates test the
//! record, never a type relationship.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Keys for the named configuration flags carried by a capability.
///
/// Flags are injected when the capability is built; nothing in this crate
/// reads global configuration state.
pub mod flags {
    /// When set, stored-logic statements with no explicit schema fall back
    /// to the dialect's default schema.
    pub const ALWAYS_OVERRIDE_STORED_LOGIC_SCHEMA: &str = "alwaysOverrideStoredLogicSchema";

    /// When set, the schema is written into the procedure body itself
    /// instead of wrapping the body in session schema switches.
    pub const USE_PROCEDURE_SCHEMA: &str = "useProcedureSchema";
}

/// Identity tag for a target database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialectId {
    /// Engine-neutral SQL.
    Generic,
    /// MySQL and compatible engines.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// Microsoft SQL Server.
    MsSql,
    /// Oracle Database.
    Oracle,
    /// IBM Db2.
    Db2,
}

impl DialectId {
    /// Returns the dialect name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::MsSql => "mssql",
            Self::Oracle => "oracle",
            Self::Db2 => "db2",
        }
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one target engine: identity, escaping rules, default schema,
/// and named configuration flags.
///
/// One instance per target engine, built once and treated as immutable for
/// the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectCapability {
    id: DialectId,
    default_schema: Option<String>,
    flags: BTreeMap<String, bool>,
}

impl DialectCapability {
    /// Creates a capability for the given engine with no default schema
    /// and no flags set.
    #[must_use]
    pub fn new(id: DialectId) -> Self {
        Self {
            id,
            default_schema: None,
            flags: BTreeMap::new(),
        }
    }

    /// Sets the default schema reported by the target connection.
    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Sets a named configuration flag.
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Returns the engine identity tag.
    #[must_use]
    pub const fn id(&self) -> DialectId {
        self.id
    }

    /// Returns the default schema, if known.
    #[must_use]
    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    /// Looks up a named flag; unset flags read as false.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Returns whether the engine supports the replace-if-exists
    /// placeholder-probe idiom for stored procedures.
    #[must_use]
    pub const fn supports_replace_if_exists(&self) -> bool {
        matches!(self.id, DialectId::MsSql)
    }

    /// Returns whether multi-way merge procedure bodies on this engine
    /// need a forced trailing statement terminator.
    #[must_use]
    pub const fn requires_merge_terminator(&self) -> bool {
        matches!(self.id, DialectId::MsSql)
    }

    /// Returns the statement that switches the session's active schema,
    /// for engines that expose one.
    #[must_use]
    pub fn session_schema_statement(&self, schema: &str) -> Option<String> {
        match self.id {
            DialectId::Oracle => Some(format!(
                "ALTER SESSION SET CURRENT_SCHEMA={}",
                self.escape_object_name(schema)
            )),
            DialectId::Db2 => Some(format!("SET CURRENT SCHEMA {schema}")),
            _ => None,
        }
    }

    /// Escapes a single-part object name (procedure, index, constraint).
    ///
    /// Plain identifiers pass through bare; anything else is quoted in the
    /// engine's style with embedded quote characters doubled.
    #[must_use]
    pub fn escape_object_name(&self, name: &str) -> String {
        if is_plain_identifier(name) {
            return name.to_string();
        }
        match self.id {
            DialectId::MySql => format!("`{}`", name.replace('`', "``")),
            DialectId::MsSql => format!("[{}]", name.replace(']', "]]")),
            _ => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    /// Escapes a catalog name.
    #[must_use]
    pub fn escape_catalog_name(&self, name: &str) -> String {
        self.escape_object_name(name)
    }

    /// Escapes a schema name.
    #[must_use]
    pub fn escape_schema_name(&self, name: &str) -> String {
        self.escape_object_name(name)
    }

    /// Escapes a column name.
    #[must_use]
    pub fn escape_column_name(&self, name: &str) -> String {
        self.escape_object_name(name)
    }

    /// Escapes an object name, qualifying it with the catalog and schema
    /// when present.
    #[must_use]
    pub fn escape_qualified_name(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        name: &str,
    ) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(catalog) = catalog {
            parts.push(self.escape_catalog_name(catalog));
        }
        if let Some(schema) = schema {
            parts.push(self.escape_schema_name(schema));
        }
        parts.push(self.escape_object_name(name));
        parts.join(".")
    }

    /// Escapes a table name, qualifying it with the catalog and schema
    /// when present.
    #[must_use]
    pub fn escape_table_name(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> String {
        self.escape_qualified_name(catalog, schema, table)
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
