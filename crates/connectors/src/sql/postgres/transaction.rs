use crate::sql::{base::error::DbError, postgres::params::PgParamStore};

/// An open Postgres transaction.
///
/// Dropping the value without calling [`commit`](Self::commit) rolls the
/// transaction back, so every early return leaves the database untouched.
pub struct PgTransaction<'a> {
    inner: tokio_postgres::Transaction<'a>,
}

/// A statement prepared inside a transaction, reusable across executions.
pub struct Prepared {
    statement: tokio_postgres::Statement,
}

impl<'a> PgTransaction<'a> {
    pub(crate) fn new(inner: tokio_postgres::Transaction<'a>) -> Self {
        PgTransaction { inner }
    }

    /// Runs a multi-statement script inside the transaction.
    pub async fn batch_execute(&self, script: &str) -> Result<(), DbError> {
        self.inner.batch_execute(script).await?;
        Ok(())
    }

    pub async fn prepare(&self, sql: &str) -> Result<Prepared, DbError> {
        let statement = self.inner.prepare(sql).await?;
        Ok(Prepared { statement })
    }

    /// Executes a prepared statement with one cell bound per parameter,
    /// returning the number of rows affected.
    pub async fn execute(
        &self,
        prepared: &Prepared,
        cells: &[Option<String>],
    ) -> Result<u64, DbError> {
        let bindings = PgParamStore::from_cells(cells);
        Ok(self
            .inner
            .execute(&prepared.statement, &bindings.as_refs())
            .await?)
    }

    /// Runs a query whose single row and column is a boolean.
    pub async fn query_bool(&self, sql: &str) -> Result<bool, DbError> {
        let row = self.inner.query_one(sql, &[]).await?;
        Ok(row.get(0))
    }

    pub async fn commit(self) -> Result<(), DbError> {
        self.inner.commit().await?;
        Ok(())
    }
}
