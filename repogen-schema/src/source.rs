//! Schema sources.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{ColumnInfo, FetchError, SchemaFileError};

/// Something that can describe the columns of a table.
///
/// Calls are sequential; implementations need no internal locking.
pub trait SchemaSource {
    /// Columns of `table`, in declaration order.
    fn describe(&self, table: &str) -> Result<Vec<ColumnInfo>, FetchError>;
}

impl<T: SchemaSource + ?Sized> SchemaSource for &T {
    fn describe(&self, table: &str) -> Result<Vec<ColumnInfo>, FetchError> {
        (**self).describe(table)
    }
}

/// Schema declared up front, typically read from a TOML file.
///
/// ```toml
/// [[tables.invoices]]
/// name = "id"
/// type = "bigint"
/// key = "PRI"
/// extra = "auto_increment"
///
/// [[tables.invoices]]
/// name = "created_at"
/// type = "datetime"
/// nullable = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    tables: IndexMap<String, Vec<ColumnInfo>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table.
    pub fn with_table(
        mut self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = ColumnInfo>,
    ) -> Self {
        self.tables
            .insert(table.into(), columns.into_iter().collect());
        self
    }

    /// Read a schema file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaFileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaFileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a schema with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self, SchemaFileError> {
        toml::from_str(content).map_err(|e| SchemaFileError::parse(e, content, filename))
    }

    /// Table names in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl FromStr for StaticSchema {
    type Err = SchemaFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_filename(s, "schema.toml")
    }
}

impl SchemaSource for StaticSchema {
    fn describe(&self, table: &str) -> Result<Vec<ColumnInfo>, FetchError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                table: table.to_string(),
            })
    }
}
