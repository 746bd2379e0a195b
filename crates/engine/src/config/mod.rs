use connectors::file::csv::CsvSettings;
use model::{schema::TableSchema, table::TableRef};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod env;
pub mod error;

pub use env::Environment;
pub use error::ConfigError;

/// What a re-run does to rows that are already in the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Plain insert. Re-running the pipeline duplicates rows.
    #[default]
    Append,
    /// Fail when the destination already holds any row.
    Reject,
    /// `ON CONFLICT` upsert over the schema's key columns.
    Upsert,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadSettings {
    #[serde(default)]
    pub policy: LoadPolicy,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub statement_timeout_secs: Option<u64>,
}

impl Default for LoadSettings {
    fn default() -> Self {
        LoadSettings {
            policy: LoadPolicy::default(),
            connect_timeout_secs: default_connect_timeout(),
            statement_timeout_secs: None,
        }
    }
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_delimiter() -> char {
    ','
}

/// The pipeline document as written on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PipelineDoc {
    table: TableRef,
    input: PathBuf,
    transformed: PathBuf,
    schema: PathBuf,
    ddl: PathBuf,
    #[serde(default = "default_delimiter")]
    delimiter: char,
    #[serde(default)]
    load: LoadSettings,
}

/// Fully resolved pipeline configuration.
///
/// Relative paths in the document resolve against the document's own
/// directory, so a pipeline behaves the same from any working directory.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub table: TableRef,
    pub input: PathBuf,
    pub transformed: PathBuf,
    pub schema: PathBuf,
    pub ddl: PathBuf,
    pub csv: CsvSettings,
    pub load: LoadSettings,
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = read(path)?;
        let doc: PipelineDoc = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        // The csv reader and writer take the delimiter as a single byte.
        if !doc.delimiter.is_ascii() {
            return Err(ConfigError::Invalid {
                name: "delimiter".to_string(),
                reason: format!("'{}' is not an ASCII character", doc.delimiter),
            });
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(PipelineConfig {
            table: doc.table,
            input: resolve(base, doc.input),
            transformed: resolve(base, doc.transformed),
            schema: resolve(base, doc.schema),
            ddl: resolve(base, doc.ddl),
            csv: CsvSettings {
                delimiter: doc.delimiter,
            },
            load: doc.load,
        })
    }

    /// Reads and checks the schema description document.
    pub fn load_schema(&self) -> Result<TableSchema, ConfigError> {
        let text = read(&self.schema)?;
        let schema: TableSchema =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: self.schema.display().to_string(),
                source,
            })?;
        schema
            .ensure_well_formed()
            .map_err(|source| ConfigError::Schema {
                path: self.schema.display().to_string(),
                source,
            })?;
        Ok(schema)
    }

    /// Reads the DDL script verbatim.
    pub fn load_ddl(&self) -> Result<String, ConfigError> {
        read(&self.ddl)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.load.connect_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.load.statement_timeout_secs.map(Duration::from_secs)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
