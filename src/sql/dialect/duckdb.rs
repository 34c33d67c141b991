//! DuckDB SQL dialect.
//!
//! Useful for running composed queries against a local extract of a
//! warehouse table. Only identifier quoting differs from BigQuery.

use super::helpers;
use super::SqlDialect;

/// DuckDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    // Uses default emit_limit_offset (LIMIT ... OFFSET ...)
}
