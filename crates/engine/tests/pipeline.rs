use async_trait::async_trait;
use connectors::sql::base::error::DbError;
use engine::config::{Environment, LoadPolicy, PipelineConfig};
use engine::error::{EngineError, SinkError, Stage};
use engine::runner;
use engine::sink::{LoadRequest, Sink};
use engine::stages::validate::ValidationError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCHEMA_DOC: &str = concat!(
    "columns:\n",
    "  - name: id\n",
    "    nullable: false\n",
    "  - name: status\n",
);

const DDL: &str = concat!(
    "CREATE TABLE IF NOT EXISTS public.email_thread_details (\n",
    "    id TEXT NOT NULL,\n",
    "    status TEXT\n",
    ");\n",
);

/// One captured call to `Sink::load`.
struct CapturedLoad {
    table: String,
    ddl: String,
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    policy: LoadPolicy,
    conflict_keys: Vec<String>,
}

/// In-memory stand-in for the Postgres sink. A configured failure row
/// leaves nothing captured, mirroring a rolled-back transaction.
#[derive(Default)]
struct MemorySink {
    loads: Vec<CapturedLoad>,
    fail_at_row: Option<usize>,
}

#[async_trait]
impl Sink for MemorySink {
    async fn load(&mut self, request: LoadRequest<'_>) -> Result<u64, SinkError> {
        if let Some(row) = self.fail_at_row
            && request.set.len() >= row
        {
            return Err(SinkError::Insert {
                row,
                source: DbError::Write("induced failure".to_string()),
            });
        }

        let rows: Vec<Vec<Option<String>>> = request
            .set
            .records()
            .iter()
            .map(|r| r.cells().to_vec())
            .collect();
        let affected = rows.len() as u64;
        self.loads.push(CapturedLoad {
            table: request.table.qualified(),
            ddl: request.ddl.to_string(),
            columns: request.set.header().columns().to_vec(),
            rows,
            policy: request.policy,
            conflict_keys: request.conflict_keys.to_vec(),
        });
        Ok(affected)
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Lays out a dataset directory and returns its parsed configuration.
fn dataset(dir: &TempDir, input_csv: &str, schema_doc: &str, extra_config: &str) -> PipelineConfig {
    let root = dir.path();
    write(
        root,
        "ingest.yaml",
        &format!(
            concat!(
                "table: public.email_thread_details\n",
                "input: sample_data/raw.csv\n",
                "transformed: sample_data/transformed.csv\n",
                "schema: config/schema.yaml\n",
                "ddl: config/create_table.sql\n",
                "{}",
            ),
            extra_config
        ),
    );
    write(root, "config/schema.yaml", schema_doc);
    write(root, "config/create_table.sql", DDL);
    if !input_csv.is_empty() {
        write(root, "sample_data/raw.csv", input_csv);
    }
    PipelineConfig::from_file(&root.join("ingest.yaml")).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn full_run_transforms_and_loads() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(
        &dir,
        "id,status\n1,open\n2, Done \n3,\n4,\"   \"\n",
        SCHEMA_DOC,
        "",
    );

    let mut sink = MemorySink::default();
    let summary = runner::run_with_sink(&config, &mut sink).await.unwrap();

    assert_eq!(summary.transform.rows_in, 4);
    assert_eq!(summary.transform.rows_filtered, 1);
    assert_eq!(summary.transform.rows_out, 3);
    // Row 3's status is already absent when read, so only row 4's
    // whitespace-only cell counts as nulled.
    assert_eq!(summary.transform.cells_nulled, 1);
    assert_eq!(summary.load.rows_loaded, 3);
    assert_eq!(summary.load.table, "public.email_thread_details");

    // Transformed artifact is written even though the handoff is in-memory.
    let staged = fs::read_to_string(dir.path().join("sample_data/transformed.csv")).unwrap();
    assert_eq!(staged, "id,status\n1,open\n3,\n4,\n");

    let load = &sink.loads[0];
    assert_eq!(load.table, "public.email_thread_details");
    assert_eq!(load.ddl, DDL);
    assert_eq!(load.columns, vec!["id", "status"]);
    assert_eq!(load.rows, vec![
        vec![Some("1".to_string()), Some("open".to_string())],
        vec![Some("3".to_string()), None],
        vec![Some("4".to_string()), None],
    ]);
    assert_eq!(load.policy, LoadPolicy::Append);
    assert!(load.conflict_keys.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn schema_mismatch_stops_before_transform() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(&dir, "id,state\n1,open\n", SCHEMA_DOC, "");

    let mut sink = MemorySink::default();
    let err = runner::run_with_sink(&config, &mut sink).await.unwrap_err();

    assert_eq!(err.stage, Stage::Validate);
    match err.source {
        EngineError::Validation(ValidationError::SchemaMismatch { missing, unexpected }) => {
            assert_eq!(missing, vec!["status"]);
            assert_eq!(unexpected, vec!["state"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(!dir.path().join("sample_data/transformed.csv").exists());
    assert!(sink.loads.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_input_fails_the_check_stage() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(&dir, "", SCHEMA_DOC, "");

    let mut sink = MemorySink::default();
    let err = runner::run_with_sink(&config, &mut sink).await.unwrap_err();

    assert_eq!(err.stage, Stage::Check);
    assert!(matches!(err.source, EngineError::File(_)));
    assert!(sink.loads.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn null_in_required_column_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(&dir, "id,status\n1,open\n,closed\n", SCHEMA_DOC, "");

    let mut sink = MemorySink::default();
    let err = runner::run_with_sink(&config, &mut sink).await.unwrap_err();

    assert_eq!(err.stage, Stage::Validate);
    assert!(matches!(
        err.source,
        EngineError::Validation(ValidationError::NullConstraint { ref column }) if column == "id"
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn insert_failure_reports_row_position_and_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(
        &dir,
        "id,status\n1,open\n2,open\n3,open\n",
        SCHEMA_DOC,
        "",
    );

    let mut sink = MemorySink {
        fail_at_row: Some(2),
        ..Default::default()
    };
    let err = runner::run_with_sink(&config, &mut sink).await.unwrap_err();

    assert_eq!(err.stage, Stage::Load);
    assert!(matches!(
        err.source,
        EngineError::Sink(SinkError::Insert { row: 2, .. })
    ));
    assert!(sink.loads.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upsert_without_key_columns_is_rejected_before_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(
        &dir,
        "id,status\n1,open\n",
        SCHEMA_DOC,
        "load:\n  policy: upsert\n",
    );

    let mut sink = MemorySink::default();
    let err = runner::run_with_sink(&config, &mut sink).await.unwrap_err();

    assert_eq!(err.stage, Stage::Load);
    assert!(matches!(err.source, EngineError::Config(_)));
    assert!(sink.loads.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upsert_passes_schema_keys_to_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let schema = concat!(
        "columns:\n",
        "  - name: id\n",
        "    nullable: false\n",
        "    key: true\n",
        "  - name: status\n",
    );
    let config = dataset(
        &dir,
        "id,status\n1,open\n",
        schema,
        "load:\n  policy: upsert\n",
    );

    let mut sink = MemorySink::default();
    runner::run_with_sink(&config, &mut sink).await.unwrap();

    let load = &sink.loads[0];
    assert_eq!(load.policy, LoadPolicy::Upsert);
    assert_eq!(load.conflict_keys, vec!["id"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_credentials_fail_the_load_stage_without_connecting() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(&dir, "id,status\n1,open\n", SCHEMA_DOC, "");

    let err = runner::run(&config, &Environment::empty())
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Load);
    match err.source {
        EngineError::Config(config_err) => {
            let message = config_err.to_string();
            for var in ["PG_HOST", "PG_PORT", "PG_DB", "PG_USER", "PG_PASSWORD"] {
                assert!(message.contains(var), "missing {var} in: {message}");
            }
        }
        other => panic!("unexpected error: {other}"),
    }

    // The front stages still ran: the transformed artifact exists.
    assert!(dir.path().join("sample_data/transformed.csv").exists());
}
