use crate::{
    config::{Environment, PipelineConfig},
    error::{EngineError, PipelineError, Stage},
    report::RunSummary,
    sink::{PostgresSink, Sink},
    stages::{check, load, transform, validate},
};
use chrono::Utc;
use model::records::RecordSet;
use tracing::info;
use uuid::Uuid;

/// Runs all four stages in order, stopping at the first failure.
///
/// Connection parameters are resolved only once the load stage is reached,
/// so the earlier stages never demand credentials.
pub async fn run(
    config: &PipelineConfig,
    env: &Environment,
) -> Result<RunSummary, PipelineError> {
    let run_id = Uuid::new_v4().to_string();
    info!("Pipeline run {run_id} starting");
    let started_at = Utc::now();

    let (transform, set) = run_front(config)?;

    let load = async {
        let params = env.connection_params(config.connect_timeout())?;
        let mut sink = PostgresSink::new(params);
        load::run_with(config, set, &mut sink).await
    }
    .await
    .map_err(|source| PipelineError::new(Stage::Load, source))?;

    let summary = RunSummary::new(run_id, started_at, transform, load);
    info!(
        "Pipeline run {} completed in {} ms",
        summary.run_id, summary.duration_ms
    );
    Ok(summary)
}

/// Same sequence with a caller-supplied sink; used by tests and embedders.
pub async fn run_with_sink(
    config: &PipelineConfig,
    sink: &mut dyn Sink,
) -> Result<RunSummary, PipelineError> {
    let run_id = Uuid::new_v4().to_string();
    info!("Pipeline run {run_id} starting");
    let started_at = Utc::now();

    let (transform, set) = run_front(config)?;
    let load = load::run_with(config, set, sink)
        .await
        .map_err(|source| PipelineError::new(Stage::Load, source))?;

    Ok(RunSummary::new(run_id, started_at, transform, load))
}

fn run_front(
    config: &PipelineConfig,
) -> Result<(transform::TransformSummary, RecordSet), PipelineError> {
    stage(Stage::Check, check::run(config))?;
    stage(Stage::Validate, validate::run(config))?;
    stage(Stage::Transform, transform::run(config))
}

fn stage<T>(stage: Stage, result: Result<T, EngineError>) -> Result<T, PipelineError> {
    result.map_err(|source| PipelineError::new(stage, source))
}
