use crate::error::SchemaError;
use serde::Deserialize;

/// One column of a table schema description.
///
/// `nullable` defaults to `true` (a column that does not say otherwise
/// accepts nulls); `key` marks the column as part of the destination's
/// conflict key and defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default = "nullable_default")]
    pub nullable: bool,
    #[serde(default)]
    pub key: bool,
}

fn nullable_default() -> bool {
    true
}

/// The expected shape of the input artifact: ordered column specs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Rejects schemas that cannot describe any artifact: no columns, or
    /// the same column named twice.
    pub fn ensure_well_formed(&self) -> Result<(), SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = std::collections::HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Columns whose values must never be null.
    pub fn non_nullable(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| !c.nullable)
    }

    /// Columns flagged as the destination's conflict key.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.key)
    }
}
