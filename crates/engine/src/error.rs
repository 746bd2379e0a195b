use crate::{config::error::ConfigError, stages::validate::ValidationError};
use connectors::{
    file::csv::error::FileError,
    sql::base::error::{ConnectorError, DbError},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Top-level errors for the ingestion engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Errors raised while writing to the destination database.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Connection failed: {0}")]
    Connect(#[from] ConnectorError),

    #[error("DDL execution failed: {0}")]
    Ddl(#[source] DbError),

    #[error("Insert failed at row {row}: {source}")]
    Insert {
        row: usize,
        #[source]
        source: DbError,
    },

    #[error("Commit failed: {0}")]
    Commit(#[source] DbError),

    #[error("Destination table '{0}' is not empty")]
    DestinationNotEmpty(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// The four units of work, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Check,
    Validate,
    Transform,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Check => "check",
            Stage::Validate => "validate",
            Stage::Transform => "transform",
            Stage::Load => "load",
        };
        f.write_str(name)
    }
}

/// A stage failure, tagged with the stage that raised it.
#[derive(Debug, Error)]
#[error("Stage '{stage}' failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: EngineError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: EngineError) -> Self {
        PipelineError { stage, source }
    }
}
