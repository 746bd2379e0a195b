use crate::sql::{
    base::error::{ConnectorError, DbError},
    postgres::{config::ConnectionParams, transaction::PgTransaction, utils::connect_client},
};
use tokio_postgres::Client;
use tracing::debug;

/// A live Postgres session.
///
/// The adapter owns the client; the connection driver runs on a spawned
/// task. Transactions borrow the client mutably, so a caller can hold at
/// most one open transaction at a time.
pub struct PgAdapter {
    client: Client,
}

impl PgAdapter {
    pub async fn connect(params: &ConnectionParams) -> Result<Self, ConnectorError> {
        debug!(endpoint = %params.endpoint(), tls = ?params.tls, "Connecting to Postgres");
        let client = connect_client(params.pg_config()).await?;
        Ok(PgAdapter { client })
    }

    /// Round-trips a trivial query to prove the session is usable.
    pub async fn ping(&self) -> Result<(), DbError> {
        let row = self.client.query_one("SELECT 1", &[]).await?;
        let val: i32 = row.get(0);
        if val != 1 {
            return Err(DbError::Unknown(format!(
                "ping returned unexpected result: {val}"
            )));
        }
        Ok(())
    }

    pub async fn transaction(&mut self) -> Result<PgTransaction<'_>, DbError> {
        Ok(PgTransaction::new(self.client.transaction().await?))
    }
}
