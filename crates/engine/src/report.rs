use crate::stages::{load::LoadSummary, transform::TransformSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Serializable account of one completed pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub engine_version: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub transform: TransformSummary,
    pub load: LoadSummary,
}

impl RunSummary {
    pub fn new(
        run_id: String,
        started_at: DateTime<Utc>,
        transform: TransformSummary,
        load: LoadSummary,
    ) -> Self {
        let finished_at = Utc::now();
        RunSummary {
            run_id,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            started_at,
            finished_at,
            duration_ms: (finished_at - started_at).num_milliseconds(),
            transform,
            load,
        }
    }
}
