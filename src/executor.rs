//! Boundary to the warehouse that runs composed queries.
//!
//! Transport and authentication live behind [`QueryExecutor`]. The client
//! here only forwards SQL text and keeps the last result set; it never
//! inspects row contents and never retries.

use thiserror::Error;

use crate::compose::Composer;

/// One result row, columns in `SELECT` order.
pub type Row = Vec<serde_json::Value>;

pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Could not reach the warehouse.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The warehouse rejected or failed the query.
    #[error("query failed: {message}")]
    Query { message: String },

    /// `fetch_all` was called before any query ran.
    #[error("no query has been executed")]
    NoQuery,
}

impl ExecutorError {
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Runs one SQL statement and returns the complete result set.
pub trait QueryExecutor {
    fn execute(&self, sql: &str) -> ExecutorResult<Vec<Row>>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn execute(&self, sql: &str) -> ExecutorResult<Vec<Row>> {
        (**self).execute(sql)
    }
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn execute(&self, sql: &str) -> ExecutorResult<Vec<Row>> {
        (**self).execute(sql)
    }
}

/// Thin client over an executor, holding the last query and its rows.
#[derive(Debug)]
pub struct SqlClient<E> {
    executor: E,
    last_query: Option<String>,
    records: Vec<Row>,
}

impl<E: QueryExecutor> SqlClient<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            last_query: None,
            records: Vec::new(),
        }
    }

    /// Run `sql`, replacing any previously held records.
    pub fn query(&mut self, sql: &str) -> ExecutorResult<&[Row]> {
        self.last_query = Some(sql.to_string());
        self.records.clear();

        match self.executor.execute(sql) {
            Ok(rows) => {
                log::debug!("query returned {} rows", rows.len());
                self.records = rows;
                Ok(&self.records)
            }
            Err(err) => {
                log::error!("{}: {}", err, sql);
                Err(err)
            }
        }
    }

    /// Build `composer`'s query and run it.
    pub fn run(&mut self, composer: &Composer) -> ExecutorResult<&[Row]> {
        let sql = composer.build_query();
        self.query(&sql)
    }

    /// Rows of the last successful query.
    pub fn fetch_all(&self) -> ExecutorResult<&[Row]> {
        match self.last_query {
            Some(_) => Ok(&self.records),
            None => Err(ExecutorError::NoQuery),
        }
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}
