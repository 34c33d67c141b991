//! SQL Dialect definitions and formatting rules.
//!
//! Each dialect implements `SqlDialect` to handle the few places where
//! composed queries differ between warehouses:
//!
//! - Identifier quoting: `` ` `` (BigQuery), `"` (DuckDB)
//! - Pagination: LIMIT/OFFSET
//!
//! # Usage
//!
//! ```ignore
//! use aggsql::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::BigQuery;
//! let quoted = dialect.quote_identifier("proj.ds.events");  // `proj.ds.events`
//! ```

mod bigquery;
mod duckdb;
pub mod helpers;

pub use bigquery::BigQuery;
pub use duckdb::DuckDb;

use serde::{Deserialize, Serialize};

use super::token::TokenStream;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations follow standard SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table name).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Emit LIMIT/OFFSET or equivalent pagination clause.
    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_standard(limit, offset)
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    BigQuery,
    DuckDb,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::BigQuery => &BigQuery,
            Dialect::DuckDb => &DuckDb,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        self.dialect().emit_limit_offset(limit, offset)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bigquery() {
        assert_eq!(Dialect::default(), Dialect::BigQuery);
        assert_eq!(Dialect::default().name(), "bigquery");
    }

    #[test]
    fn test_delegation() {
        assert_eq!(Dialect::BigQuery.quote_identifier("t"), "`t`");
        assert_eq!(Dialect::DuckDb.quote_identifier("t"), "\"t\"");
        assert_eq!(
            Dialect::DuckDb
                .emit_limit_offset(Some(3), Some(1))
                .serialize(Dialect::DuckDb),
            "LIMIT 3 OFFSET 1"
        );
    }

    #[test]
    fn test_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            dialect: Dialect,
        }

        let w: Wrapper = toml::from_str("dialect = \"duckdb\"").unwrap();
        assert_eq!(w.dialect, Dialect::DuckDb);

        let w: Wrapper = toml::from_str("dialect = \"bigquery\"").unwrap();
        assert_eq!(w.dialect, Dialect::BigQuery);
    }
}
