use crate::{
    config::LoadPolicy,
    error::SinkError,
    sink::{LoadRequest, Sink},
};
use async_trait::async_trait;
use connectors::sql::{
    base::{
        error::DbError,
        query::{InsertStatement, any_row_probe},
    },
    postgres::{ConnectionParams, PgAdapter},
};
use tracing::{debug, info};

/// Production sink: one connection and one transaction per load.
///
/// Construction is plain; the connection is only established inside
/// [`load`](Sink::load), after every configuration check has passed, and is
/// dropped when the load returns.
pub struct PostgresSink {
    params: ConnectionParams,
}

impl PostgresSink {
    pub fn new(params: ConnectionParams) -> Self {
        PostgresSink { params }
    }
}

#[async_trait]
impl Sink for PostgresSink {
    async fn load(&mut self, request: LoadRequest<'_>) -> Result<u64, SinkError> {
        let insert = build_insert(&request).map_err(SinkError::Database)?;
        let sql = insert.render();
        debug!("Insert statement: {sql}");

        let mut adapter = PgAdapter::connect(&self.params).await?;
        let tx = adapter.transaction().await?;

        if let Some(timeout) = request.statement_timeout {
            tx.batch_execute(&format!(
                "SET LOCAL statement_timeout = {}",
                timeout.as_millis()
            ))
            .await?;
        }

        tx.batch_execute(request.ddl).await.map_err(SinkError::Ddl)?;

        if request.policy == LoadPolicy::Reject {
            let occupied = tx.query_bool(&any_row_probe(request.table)).await?;
            if occupied {
                return Err(SinkError::DestinationNotEmpty(request.table.qualified()));
            }
        }

        let prepared = tx.prepare(&sql).await?;
        let mut affected = 0u64;
        for (position, record) in request.set.records().iter().enumerate() {
            affected += tx
                .execute(&prepared, record.cells())
                .await
                .map_err(|source| SinkError::Insert {
                    row: position + 1,
                    source,
                })?;
        }

        tx.commit().await.map_err(SinkError::Commit)?;
        info!("Loaded {} rows into {}", affected, request.table);
        Ok(affected)
    }
}

fn build_insert(request: &LoadRequest<'_>) -> Result<InsertStatement, DbError> {
    let columns = request.set.header().columns().to_vec();
    let insert = InsertStatement::new(request.table.clone(), columns)?;
    Ok(match request.policy {
        LoadPolicy::Upsert => insert.on_conflict(request.conflict_keys),
        LoadPolicy::Append | LoadPolicy::Reject => insert,
    })
}
