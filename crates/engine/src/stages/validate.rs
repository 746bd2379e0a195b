use crate::{config::PipelineConfig, error::EngineError};
use connectors::file::csv::CsvSource;
use model::{records::RecordSet, schema::TableSchema};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The artifact's column set differs from the declared one.
    /// `missing` lists declared-but-absent names in declaration order,
    /// `unexpected` lists present-but-undeclared names in header order.
    #[error("Schema mismatch: missing columns {missing:?}, unexpected columns {unexpected:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Column '{column}' is declared non-nullable but contains absent values")]
    NullConstraint { column: String },
}

/// Schema gate: the artifact's header must equal the declared column set
/// exactly, and every non-nullable column must be fully populated.
pub fn run(config: &PipelineConfig) -> Result<(), EngineError> {
    let schema = config.load_schema()?;
    let set = CsvSource::open(&config.input, config.csv)?.read_all()?;
    check_conformance(&schema, &set)?;
    info!(
        "Validated {} rows against {}",
        set.len(),
        config.schema.display()
    );
    Ok(())
}

/// Pure conformance check, shared by the stage and its tests.
///
/// Column names compare exactly (case-sensitive). The first violation
/// aborts; there is no accumulated report.
pub fn check_conformance(schema: &TableSchema, set: &RecordSet) -> Result<(), ValidationError> {
    let declared: Vec<&str> = schema.column_names().collect();
    let header = set.header();

    let missing: Vec<String> = declared
        .iter()
        .filter(|name| !header.contains(name))
        .map(|name| name.to_string())
        .collect();
    let unexpected: Vec<String> = header
        .columns()
        .iter()
        .filter(|name| !declared.contains(&name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(ValidationError::SchemaMismatch {
            missing,
            unexpected,
        });
    }

    for column in schema.non_nullable() {
        let Some(position) = header.position(&column.name) else {
            continue;
        };
        if set
            .records()
            .iter()
            .any(|record| record.cell(position).is_none())
        {
            return Err(ValidationError::NullConstraint {
                column: column.name.clone(),
            });
        }
    }

    Ok(())
}
