use connectors::sql::base::error::{ConnectorError, DbError};
use engine::{
    config::ConfigError,
    error::{EngineError, PipelineError},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load the pipeline configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Stage failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Pipeline run failed: {0}")]
    Run(#[from] PipelineError),

    #[error("Failed to serialize the run summary to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid env file: {0}")]
    EnvFile(String),

    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Database(#[from] DbError),

    #[error("Connection failed: {0}")]
    Connector(#[from] ConnectorError),
}
