use crate::error::RecordError;
use std::collections::HashSet;

/// Ordered column names shared by every record in a set.
///
/// Column order is the artifact's column order and is preserved end to end;
/// duplicate names are rejected at construction. Name lookups are exact
/// (case-sensitive), matching how the schema description is compared
/// against the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Result<Self, RecordError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(RecordError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Header { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Ordinal of the named column, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}
