use thiserror::Error;

/// A malformed schema description document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema declares no columns")]
    Empty,

    #[error("schema declares column '{0}' more than once")]
    DuplicateColumn(String),
}

/// A record set whose shape does not hold together.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error("row {row} has {found} cells, header declares {expected} columns")]
    Arity {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid table reference '{0}': expected 'table' or 'schema.table'")]
pub struct TableRefError(pub String);
