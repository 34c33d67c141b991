//! Query composition: from a query spec to one SQL statement.
//!
//! ```text
//! JSON → RawSpec → QueryRecord → {GROUP BY clauses, VALUES clauses}
//!      → projection fields → SQL
//! ```
//!
//! All parsing happens when the [`Composer`] is constructed; a composer
//! that exists is fully parsed and [`Composer::build_query`] cannot fail.
//!
//! # Example
//!
//! ```ignore
//! use aggsql::compose::Composer;
//!
//! let composer = Composer::from_json_str(r#"{
//!     "TABLE_NAME": "t",
//!     "GROUP_BY": [{"Field": "category"}],
//!     "VALUES": [{"Field": "round", "Operation": "COUNT"}],
//!     "TOTAL_LIMIT": 5
//! }"#)?;
//!
//! assert_eq!(
//!     composer.build_query(),
//!     "SELECT category, COUNT(round) FROM `t` GROUP BY category LIMIT 5"
//! );
//! ```

use std::path::Path;

use serde_json::Value;

use crate::spec::{
    load_spec, parse_spec, GroupByClauses, LoadError, QueryRecord, RawSpec, Schema, SchemaError,
    ValueClauses, ValueEntry,
};
use crate::sql::{
    AggregationFunction, Dialect, FieldCollection, FunctionError, SqlDialect, SqlFunction, Token,
    TokenStream,
};

// ============================================================================
// Error Types
// ============================================================================

/// Fatal errors raised while constructing a [`Composer`].
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Function(#[from] FunctionError),

    #[error("Value entry for field '{field}' has no Operation")]
    MissingOperation { field: String },
}

impl ComposeError {
    /// The missing mandatory key, for schema `MissingField` errors.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            ComposeError::Schema(err) => err.missing_field(),
            _ => None,
        }
    }

    /// The rejected function name, for unsupported functions.
    pub fn unsupported_function(&self) -> Option<&str> {
        match self {
            ComposeError::Function(err) => Some(err.name()),
            _ => None,
        }
    }
}

pub type ComposeResult<T> = Result<T, ComposeError>;

// ============================================================================
// Composer
// ============================================================================

/// A parsed query spec, ready to render.
#[derive(Debug, Clone)]
pub struct Composer {
    record: QueryRecord,
    group_by: GroupByClauses,
    values: ValueClauses,
    fields: FieldCollection,
    group_by_fields: FieldCollection,
    dialect: Dialect,
}

impl Composer {
    /// Load and parse the spec document at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ComposeResult<Self> {
        let raw = load_spec(path)?;
        Self::from_raw(&raw)
    }

    /// Parse spec text.
    pub fn from_json_str(content: &str) -> ComposeResult<Self> {
        let raw = parse_spec(content, "<inline>")?;
        Self::from_raw(&raw)
    }

    /// Parse an already-decoded JSON value.
    pub fn from_value(value: &Value) -> ComposeResult<Self> {
        Self::parse(QueryRecord::validate(value)?)
    }

    /// Parse an untyped spec mapping.
    pub fn from_raw(raw: &RawSpec) -> ComposeResult<Self> {
        Self::parse(QueryRecord::validate_map(raw)?)
    }

    /// Render for `dialect` instead of the default BigQuery.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    fn parse(record: QueryRecord) -> ComposeResult<Self> {
        let group_by = GroupByClauses::from_raw(record.group_by.as_deref());
        let values = ValueClauses::from_raw(record.values.as_deref());
        let dialect = Dialect::default();
        let (fields, group_by_fields) = collect_fields(&group_by, &values, dialect)?;

        Ok(Self {
            record,
            group_by,
            values,
            fields,
            group_by_fields,
            dialect,
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn table(&self) -> &str {
        &self.record.table
    }

    pub fn limit(&self) -> Option<u64> {
        self.record.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.record.offset
    }

    pub fn group_by_clauses(&self) -> &GroupByClauses {
        &self.group_by
    }

    pub fn value_clauses(&self) -> &ValueClauses {
        &self.values
    }

    /// All projection fields: dimensions, then aggregated values.
    pub fn fields(&self) -> &FieldCollection {
        &self.fields
    }

    /// Dimension fields only, without aliases.
    pub fn group_by_fields(&self) -> &FieldCollection {
        &self.group_by_fields
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Render the SQL statement.
    ///
    /// Clauses are rendered in fixed order and joined with a single space;
    /// empty clauses are left out.
    pub fn build_query(&self) -> String {
        let clauses = [
            self.select_clause(),
            self.from_clause(),
            self.where_clause(),
            self.group_by_clause(),
            self.dialect.emit_limit_offset(self.limit(), self.offset()),
        ];

        let sql = clauses
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.serialize(self.dialect))
            .collect::<Vec<_>>()
            .join(" ");

        log::debug!("composed {} query: {}", self.dialect, sql);
        sql
    }

    fn select_clause(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Select).space();
        if self.fields.is_empty() {
            ts.push(Token::Star);
        } else {
            ts.comma_separated(self.fields.to_tokens());
        }
        ts
    }

    fn from_clause(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::From)
            .space()
            .push(Token::Ident(self.record.table.clone()));
        ts
    }

    // Filtering is not composed.
    fn where_clause(&self) -> TokenStream {
        TokenStream::new()
    }

    fn group_by_clause(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        if !self.group_by_fields.is_empty() {
            ts.push(Token::GroupBy)
                .space()
                .comma_separated(self.group_by_fields.to_tokens());
        }
        ts
    }
}

/// Derive the projection and dimension-only field collections.
///
/// An unsupported or missing operation on any value entry is fatal.
fn collect_fields(
    group_by: &GroupByClauses,
    values: &ValueClauses,
    dialect: Dialect,
) -> ComposeResult<(FieldCollection, FieldCollection)> {
    let mut fields = FieldCollection::new();
    let mut group_by_fields = FieldCollection::new();

    for entry in group_by.iter() {
        fields.add_field(
            &entry.field,
            entry.alias.as_deref(),
            None,
            None,
            None,
            entry.limit,
        );
        group_by_fields.add_field(&entry.field, None, None, None, None, entry.limit);
    }

    for entry in values.iter() {
        let name = entry.operation.as_deref().ok_or_else(|| {
            let err = ComposeError::MissingOperation {
                field: entry.field.clone(),
            };
            log::error!("{}", err);
            err
        })?;
        let operation = AggregationFunction::parse(name)?;
        let expression = value_expression(entry, operation).serialize(dialect);

        fields.add_field(
            &expression,
            entry.alias.as_deref(),
            Some(operation),
            entry.modifier.as_deref(),
            entry.order.as_deref(),
            entry.array_limit,
        );
    }

    Ok((fields, group_by_fields))
}

/// `[<modifier> ]<field>[ ORDER BY <field>[ <dir>]][ LIMIT <n>]`
///
/// The sub-limit only applies to `ARRAY_AGG`.
fn value_expression(entry: &ValueEntry, operation: AggregationFunction) -> TokenStream {
    let mut ts = TokenStream::new();

    if let Some(modifier) = &entry.modifier {
        ts.push(Token::Raw(modifier.clone())).space();
    }
    ts.push(Token::Raw(entry.field.clone()));

    if entry.order.is_some() {
        ts.space()
            .push(Token::OrderBy)
            .space()
            .push(Token::Raw(entry.field.clone()));
        if let Some(direction) = &entry.direction {
            ts.space().push(Token::Raw(direction.clone()));
        }
    }

    if let (AggregationFunction::ArrayAgg, Some(limit)) = (operation, entry.array_limit) {
        ts.space().push(Token::Limit).space().push(Token::LitInt(limit));
    }

    ts
}
