use crate::{config::PipelineConfig, error::EngineError};
use connectors::file::csv::CsvSource;
use tracing::info;

/// Existence gate: the input artifact must be present before any other
/// stage runs.
pub fn run(config: &PipelineConfig) -> Result<(), EngineError> {
    CsvSource::probe(&config.input)?;
    info!("Input artifact present: {}", config.input.display());
    Ok(())
}
