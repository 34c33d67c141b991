//! BigQuery SQL dialect.
//!
//! BigQuery features:
//! - Backtick identifier quoting; a whole `project.dataset.table` path
//!   goes inside one pair of backticks
//! - `LIMIT n OFFSET m` pagination
//! - `ARRAY_AGG(... ORDER BY ... LIMIT n)` inside aggregates

use super::helpers;
use super::SqlDialect;

/// BigQuery SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct BigQuery;

impl SqlDialect for BigQuery {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }
}
