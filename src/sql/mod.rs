//! SQL generation module.
//!
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//! - [`function`] - Aggregation and numbering function renderers
//! - [`field`] - Projection fields and field collections

pub mod dialect;
pub mod field;
pub mod function;
pub mod token;

#[cfg(test)]
pub mod test_utils;

pub use dialect::{Dialect, SqlDialect};
pub use field::{Field, FieldCollection};
pub use function::{
    AggregationFunction, FunctionError, FunctionFamily, NumberingFunction, SqlFunction,
};
pub use token::{Token, TokenStream};
