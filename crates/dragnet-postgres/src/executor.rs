//! Query execution against a live PostgreSQL connection.

use std::pin::Pin;

use async_trait::async_trait;
use dragnet_core::{CellValue, ExecuteError, ExecuteResult, QueryExecutor, Row, RowCursor};
use futures::TryStreamExt;
use tokio_postgres::{NoTls, RowStream};

use crate::param::TextParam;
use crate::value::PgCell;

/// A [`QueryExecutor`] backed by a single `tokio-postgres` client.
///
/// The client pipelines concurrent queries over one connection, which is
/// plenty for this service's read-only workload.
pub struct PgExecutor {
    client: tokio_postgres::Client,
}

impl PgExecutor {
    /// Connects and spawns the connection driver task. The driver only
    /// reports an error when the connection dies underneath an active
    /// client, so it logs at debug level and lets the next query surface
    /// the failure.
    pub async fn connect(conn_str: &str) -> ExecuteResult<Self> {
        let (client, connection) = tokio_postgres::connect(conn_str, NoTls)
            .await
            .map_err(connect_err)?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::debug!(%err, "postgres connection terminated");
            }
        });
        tracing::debug!("postgres connection established");
        Ok(Self { client })
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn execute(&self, sql: &str, values: &[String]) -> ExecuteResult<Box<dyn RowCursor>> {
        let stmt = self.client.prepare(sql).await.map_err(prepare_err)?;
        if stmt.params().len() != values.len() {
            return Err(ExecuteError::ParamCount {
                expected: stmt.params().len(),
                got: values.len(),
            });
        }
        let columns: Vec<String> = stmt
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect();
        let stream = self
            .client
            .query_raw(&stmt, values.iter().map(|v| TextParam(v.clone())))
            .await
            .map_err(query_err)?;
        Ok(Box::new(PgRowCursor {
            columns,
            stream: Box::pin(stream),
            done: false,
        }))
    }
}

/// Streams rows out of a [`RowStream`], decoding each column through
/// [`PgCell`]. After an error or the final row the cursor stays
/// exhausted.
pub struct PgRowCursor {
    columns: Vec<String>,
    stream: Pin<Box<RowStream>>,
    done: bool,
}

#[async_trait]
impl RowCursor for PgRowCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    async fn next_row(&mut self) -> ExecuteResult<Option<Row>> {
        if self.done {
            return Ok(None);
        }
        let row = match self.stream.try_next().await {
            Ok(Some(row)) => row,
            Ok(None) => {
                self.done = true;
                return Ok(None);
            }
            Err(err) => {
                self.done = true;
                return Err(query_err(err));
            }
        };
        let mut cells: Vec<CellValue> = Vec::with_capacity(row.len());
        for idx in 0..row.len() {
            let PgCell(value) = row.try_get(idx).map_err(|err| ExecuteError::Decode {
                column: self.columns.get(idx).cloned().unwrap_or_default(),
                message: err.to_string(),
            })?;
            cells.push(value);
        }
        Ok(Some(cells))
    }
}

fn connect_err(err: tokio_postgres::Error) -> ExecuteError {
    ExecuteError::Connection(err.to_string())
}

fn prepare_err(err: tokio_postgres::Error) -> ExecuteError {
    ExecuteError::Prepare(err.to_string())
}

fn query_err(err: tokio_postgres::Error) -> ExecuteError {
    ExecuteError::Query(err.to_string())
}
