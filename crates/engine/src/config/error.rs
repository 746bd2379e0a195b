use model::error::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid schema description in '{path}': {source}")]
    Schema {
        path: String,
        #[source]
        source: SchemaError,
    },

    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },

    #[error("Load policy 'upsert' requires at least one key column in the schema description")]
    UpsertWithoutKeys,
}
