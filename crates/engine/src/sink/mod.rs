use crate::{config::LoadPolicy, error::SinkError};
use async_trait::async_trait;
use model::{records::RecordSet, table::TableRef};
use std::time::Duration;

pub mod postgres;

pub use postgres::PostgresSink;

/// Everything the sink needs for one transactional load.
pub struct LoadRequest<'a> {
    pub table: &'a TableRef,
    pub ddl: &'a str,
    pub set: &'a RecordSet,
    pub policy: LoadPolicy,
    pub conflict_keys: &'a [String],
    pub statement_timeout: Option<Duration>,
}

/// Destination seam for the load stage. The production implementation is
/// [`PostgresSink`]; tests substitute an in-memory sink.
#[async_trait]
pub trait Sink: Send {
    /// Applies the DDL and writes every record inside one transaction,
    /// returning the number of rows affected.
    async fn load(&mut self, request: LoadRequest<'_>) -> Result<u64, SinkError>;
}
