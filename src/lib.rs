//! # aggsql
//!
//! Compose aggregate SQL queries from declarative JSON specs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                JSON query spec (file / text)             │
//! │   TABLE_NAME, GROUP_BY, VALUES, TOTAL_LIMIT, OFFSET      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [spec::loader, spec::schema]
//! ┌─────────────────────────────────────────────────────────┐
//! │     QueryRecord + GROUP BY / VALUES clause collections   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql::function, sql::field]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Projection + dimension field lists            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compose, sql::dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │                       SQL text                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Running the SQL is left to a [`executor::QueryExecutor`].

pub mod compose;
pub mod config;
pub mod executor;
pub mod logging;
pub mod spec;
pub mod sql;

pub use compose::{ComposeError, ComposeResult, Composer};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compose::{ComposeError, ComposeResult, Composer};
    pub use crate::executor::{ExecutorError, QueryExecutor, Row, SqlClient};
    pub use crate::spec::{
        DateBucket, GroupByEntry, QueryRecord, SchemaError, SortDirection, ValueEntry,
    };
    pub use crate::sql::{
        AggregationFunction, Dialect, Field, FieldCollection, FunctionError, NumberingFunction,
        SqlDialect, SqlFunction,
    };
}
