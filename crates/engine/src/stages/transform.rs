use crate::{config::PipelineConfig, error::EngineError};
use connectors::file::csv::{CsvSink, CsvSource, FileError};
use model::records::RecordSet;
use serde::Serialize;
use tracing::info;

/// Column consulted by the completed-record filter.
pub const STATUS_COLUMN: &str = "status";
const STATUS_DONE: &str = "done";

/// Counters describing one transformation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub rows_in: usize,
    pub rows_filtered: usize,
    pub rows_out: usize,
    pub cells_nulled: usize,
}

/// Normalizes the raw artifact and writes the transformed artifact,
/// returning the transformed set for the in-process handoff to the loader.
pub fn run(config: &PipelineConfig) -> Result<(TransformSummary, RecordSet), EngineError> {
    let set = CsvSource::open(&config.input, config.csv)?.read_all()?;
    let (summary, transformed) = apply(set);

    if let Some(parent) = config.transformed.parent() {
        std::fs::create_dir_all(parent).map_err(FileError::from)?;
    }
    CsvSink::write(&config.transformed, &transformed, config.csv)?;

    info!(
        "Transformed {} -> {} rows ({} filtered, {} cells nulled), wrote {}",
        summary.rows_in,
        summary.rows_out,
        summary.rows_filtered,
        summary.cells_nulled,
        config.transformed.display()
    );
    Ok((summary, transformed))
}

/// Pure transformation: trim every cell, null cells that trim to empty,
/// then drop rows whose `status` is `done` (case-insensitive). Rows with
/// an absent status are kept.
pub fn apply(mut set: RecordSet) -> (TransformSummary, RecordSet) {
    let mut summary = TransformSummary {
        rows_in: set.len(),
        ..Default::default()
    };

    for record in set.iter_mut() {
        for cell in record.cells_mut() {
            if let Some(text) = cell.take() {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    summary.cells_nulled += 1;
                } else if trimmed.len() == text.len() {
                    *cell = Some(text);
                } else {
                    *cell = Some(trimmed.to_string());
                }
            }
        }
    }

    if let Some(position) = set.column_position(STATUS_COLUMN) {
        let before = set.len();
        set.retain(|record| {
            !record
                .cell(position)
                .is_some_and(|status| status.eq_ignore_ascii_case(STATUS_DONE))
        });
        summary.rows_filtered = before - set.len();
    }

    summary.rows_out = set.len();
    (summary, set)
}
