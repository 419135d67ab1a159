//! Emitted SQL fragments.

use serde::{Deserialize, Serialize};

/// Descriptor of the schema object a fragment touches, for caller-side
/// cache and metadata invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffectedObject {
    /// A whole table.
    Table {
        /// Catalog name.
        catalog: Option<String>,
        /// Schema name.
        schema: Option<String>,
        /// Table name.
        table: String,
    },

    /// A single column.
    Column {
        /// Catalog name.
        catalog: Option<String>,
        /// Schema name.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A named stored object such as a procedure.
    StoredObject {
        /// Schema name.
        schema: Option<String>,
        /// Object name.
        name: String,
    },
}

impl AffectedObject {
    /// Creates a table descriptor.
    #[must_use]
    pub fn table(
        catalog: Option<String>,
        schema: Option<String>,
        table: impl Into<String>,
    ) -> Self {
        Self::Table {
            catalog,
            schema,
            table: table.into(),
        }
    }

    /// Creates a column descriptor.
    #[must_use]
    pub fn column(
        catalog: Option<String>,
        schema: Option<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::Column {
            catalog,
            schema,
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a stored-object descriptor.
    #[must_use]
    pub fn stored_object(schema: Option<String>, name: impl Into<String>) -> Self {
        Self::StoredObject {
            schema,
            name: name.into(),
        }
    }
}

/// One emitted unit of SQL.
///
/// Fragment order within a dispatch result is execution order; the
/// dispatcher never reorders what a generator emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlFragment {
    /// The literal SQL text.
    pub sql: String,
    /// How the fragment was terminated; `None` means the execution layer's
    /// default terminator.
    pub end_delimiter: Option<String>,
    /// The schema object this fragment touches, if identifiable.
    pub affected: Option<AffectedObject>,
}

impl SqlFragment {
    /// Creates a fragment with no delimiter or affected-object tag.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: None,
            affected: None,
        }
    }

    /// Tags the fragment with the delimiter that terminated it.
    #[must_use]
    pub fn with_end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = Some(delimiter.into());
        self
    }

    /// Tags the fragment with the object it affects.
    #[must_use]
    pub fn with_affected(mut self, affected: AffectedObject) -> Self {
        self.affected = Some(affected);
        self
    }
}
