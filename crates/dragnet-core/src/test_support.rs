//! In-memory fakes for code that drives the execution seam.
//!
//! Projection and route tests run against these instead of a live database.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cursor::{QueryExecutor, Row, RowCursor};
use crate::error::{ExecuteError, ExecuteResult};
use crate::value::CellValue;

/// Build a row of text cells.
pub fn text_row(cells: &[&str]) -> Row {
    cells.iter().map(|c| CellValue::Text(c.to_string())).collect()
}

/// Cursor over a fixed set of rows, with optional mid-stream failure.
pub struct StaticRows {
    columns: Vec<String>,
    rows: VecDeque<Row>,
    fail_after: Option<usize>,
    served: usize,
}

impl StaticRows {
    pub fn new(columns: &[&str], rows: Vec<Row>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows.into(),
            fail_after: None,
            served: 0,
        }
    }

    /// Fail with a query error once `served` rows have been handed out.
    pub fn failing_after(mut self, served: usize) -> Self {
        self.fail_after = Some(served);
        self
    }
}

#[async_trait]
impl RowCursor for StaticRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    async fn next_row(&mut self) -> ExecuteResult<Option<Row>> {
        if self.fail_after.is_some_and(|limit| self.served >= limit) {
            // Fail once, then stay exhausted like a real cursor.
            self.fail_after.take();
            self.rows.clear();
            return Err(ExecuteError::Query("simulated backend failure".to_string()));
        }
        match self.rows.pop_front() {
            Some(row) => {
                self.served += 1;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }
}

/// Executor that serves the same fixed result set for every statement and
/// records each call it sees.
pub struct StaticExecutor {
    columns: Vec<String>,
    rows: Vec<Row>,
    fail_after: Option<usize>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl StaticExecutor {
    pub fn new(columns: &[&str], rows: Vec<Row>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
            fail_after: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve cursors that fail after `served` rows.
    pub fn failing_after(mut self, served: usize) -> Self {
        self.fail_after = Some(served);
        self
    }

    /// Every `(sql, values)` pair this executor has been asked to run.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for StaticExecutor {
    async fn execute(&self, sql: &str, values: &[String]) -> ExecuteResult<Box<dyn RowCursor>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), values.to_vec()));
        let columns: Vec<&str> = self.columns.iter().map(|c| c.as_str()).collect();
        let mut cursor = StaticRows::new(&columns, self.rows.clone());
        if let Some(limit) = self.fail_after {
            cursor = cursor.failing_after(limit);
        }
        Ok(Box::new(cursor))
    }
}

/// Executor that refuses every statement.
pub struct FailingExecutor {
    message: String,
}

impl FailingExecutor {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl QueryExecutor for FailingExecutor {
    async fn execute(&self, _sql: &str, _values: &[String]) -> ExecuteResult<Box<dyn RowCursor>> {
        Err(ExecuteError::Query(self.message.clone()))
    }
}
