//! Query spec input: loading, schema validation and clause collections.

pub mod clauses;
pub mod loader;
pub mod record;
pub mod schema;

pub use clauses::{Clause, ClauseCollection, GroupByClauses, SkippedEntry, ValueClauses};
pub use loader::{load_spec, parse_spec, LoadError, RawSpec};
pub use record::{DateBucket, GroupByEntry, QueryRecord, SortDirection, ValueEntry};
pub use schema::{FieldSpec, Fields, Schema, SchemaError};
