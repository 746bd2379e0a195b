use crate::{
    config::{ConfigError, Environment, LoadPolicy, PipelineConfig},
    error::EngineError,
    sink::{LoadRequest, PostgresSink, Sink},
};
use connectors::file::csv::CsvSource;
use model::records::RecordSet;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub table: String,
    pub rows_loaded: u64,
}

/// Standalone unit of work: re-reads the transformed artifact and loads it
/// with connection parameters resolved from the environment.
pub async fn run(config: &PipelineConfig, env: &Environment) -> Result<LoadSummary, EngineError> {
    let set = CsvSource::open(&config.transformed, config.csv)?.read_all()?;
    let params = env.connection_params(config.connect_timeout())?;
    let mut sink = PostgresSink::new(params);
    run_with(config, set, &mut sink).await
}

/// Loads an in-memory record set through the given sink.
pub async fn run_with(
    config: &PipelineConfig,
    set: RecordSet,
    sink: &mut dyn Sink,
) -> Result<LoadSummary, EngineError> {
    let conflict_keys = if config.load.policy == LoadPolicy::Upsert {
        let schema = config.load_schema()?;
        let keys: Vec<String> = schema.key_columns().map(|c| c.name.clone()).collect();
        if keys.is_empty() {
            return Err(ConfigError::UpsertWithoutKeys.into());
        }
        keys
    } else {
        Vec::new()
    };

    let ddl = config.load_ddl()?;
    info!(
        "Loading {} rows into {} (policy {:?})",
        set.len(),
        config.table,
        config.load.policy
    );

    let rows_loaded = sink
        .load(LoadRequest {
            table: &config.table,
            ddl: &ddl,
            set: &set,
            policy: config.load.policy,
            conflict_keys: &conflict_keys,
            statement_timeout: config.statement_timeout(),
        })
        .await?;

    Ok(LoadSummary {
        table: config.table.qualified(),
        rows_loaded,
    })
}
