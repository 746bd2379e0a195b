use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Low-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any SQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] tokio_postgres::Error),

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),

    /// An error occurred while building a SQL statement.
    #[error("Query build error: {0}")]
    QueryBuildError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The connection description itself does not make sense.
    #[error("Invalid connection parameters: {0}")]
    InvalidParams(String),

    /// Building the TLS connector failed.
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// The driver rejected or could not establish the connection.
    #[error("Postgres connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}
