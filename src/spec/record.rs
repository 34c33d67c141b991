//! Typed records for the three schema levels of a query spec.
//!
//! ```json
//! {
//!   "TABLE_NAME": "proj.ds.investments",
//!   "TOTAL_LIMIT": 100,
//!   "GROUP_BY": [{ "Field": "category", "Alias": "cat" }],
//!   "VALUES":   [{ "Field": "round", "Operation": "COUNT", "Alias": "rounds" }]
//! }
//! ```

use serde_json::Value;

use super::schema::{FieldSpec, Fields, Schema, SchemaError};
use crate::sql::token::Token;

// ============================================================================
// Enumerated values
// ============================================================================

/// Coarsening unit for temporal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
}

impl DateBucket {
    /// Parse a date bucket (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "YEAR" => Some(DateBucket::Year),
            "QUARTER" => Some(DateBucket::Quarter),
            "MONTH" => Some(DateBucket::Month),
            "WEEK" => Some(DateBucket::Week),
            "DAY" => Some(DateBucket::Day),
            "HOUR" => Some(DateBucket::Hour),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::Year => "YEAR",
            DateBucket::Quarter => "QUARTER",
            DateBucket::Month => "MONTH",
            DateBucket::Week => "WEEK",
            DateBucket::Day => "DAY",
            DateBucket::Hour => "HOUR",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a sort direction (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ASC" => Some(SortDirection::Asc),
            "DESC" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn to_token(self) -> Token {
        match self {
            SortDirection::Asc => Token::Asc,
            SortDirection::Desc => Token::Desc,
        }
    }
}

const DATE_BUCKET: &str = "one of YEAR, QUARTER, MONTH, WEEK, DAY, HOUR";
const SORT_DIRECTION: &str = "ASC or DESC";

// ============================================================================
// Query level
// ============================================================================

/// Validated top-level query spec.
///
/// `group_by` and `values` stay raw here; each element is validated on its
/// own by the clause collections so that one bad entry does not reject the
/// whole query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub table: String,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub group_by: Option<Vec<Value>>,
    pub values: Option<Vec<Value>>,
}

impl QueryRecord {
    pub const TABLE: &'static str = "TABLE_NAME";
    pub const LIMIT: &'static str = "TOTAL_LIMIT";
    pub const OFFSET: &'static str = "OFFSET";
    pub const GROUP_BY: &'static str = "GROUP_BY";
    pub const VALUES: &'static str = "VALUES";
}

impl Schema for QueryRecord {
    const KIND: &'static str = "query";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(Self::TABLE),
        FieldSpec::optional(Self::LIMIT),
        FieldSpec::optional(Self::OFFSET),
        FieldSpec::optional(Self::GROUP_BY),
        FieldSpec::optional(Self::VALUES),
    ];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            table: fields.required_non_empty_str(Self::TABLE)?,
            limit: fields.optional_u64(Self::LIMIT)?,
            offset: fields.optional_u64(Self::OFFSET)?,
            group_by: fields.optional_array(Self::GROUP_BY)?,
            values: fields.optional_array(Self::VALUES)?,
        })
    }
}

// ============================================================================
// GROUP_BY entries
// ============================================================================

/// One grouping dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByEntry {
    pub field: String,
    pub aggregation: Option<DateBucket>,
    pub alias: Option<String>,
    pub direction: Option<SortDirection>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
}

impl GroupByEntry {
    pub const FIELD: &'static str = "Field";
    pub const DATE_AGGREGATION: &'static str = "DateAggregation";
    pub const ALIAS: &'static str = "Alias";
    pub const DIRECTION: &'static str = "SortDirection";
    pub const LIMIT: &'static str = "Limit";
    pub const SORT: &'static str = "Sort";
}

impl Schema for GroupByEntry {
    const KIND: &'static str = "group-by";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(Self::FIELD),
        FieldSpec::optional(Self::DATE_AGGREGATION),
        FieldSpec::optional(Self::ALIAS),
        FieldSpec::optional(Self::DIRECTION),
        FieldSpec::optional(Self::LIMIT),
        FieldSpec::optional(Self::SORT),
    ];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            field: fields.required_non_empty_str(Self::FIELD)?,
            aggregation: fields.optional_parsed(
                Self::DATE_AGGREGATION,
                DATE_BUCKET,
                DateBucket::from_str,
            )?,
            alias: fields.optional_str(Self::ALIAS)?,
            direction: fields.optional_parsed(
                Self::DIRECTION,
                SORT_DIRECTION,
                SortDirection::from_str,
            )?,
            limit: fields.optional_u64(Self::LIMIT)?,
            sort: fields.optional_str(Self::SORT)?,
        })
    }
}

// ============================================================================
// VALUES entries
// ============================================================================

/// One aggregated output value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntry {
    pub field: String,
    pub operation: Option<String>,
    pub modifier: Option<String>,
    pub order: Option<String>,
    /// Emitted verbatim after the `ORDER BY` key (`DESC`, `ASC NULLS LAST`).
    pub direction: Option<String>,
    pub date_aggregation: Option<DateBucket>,
    pub array_limit: Option<u64>,
    pub alias: Option<String>,
}

impl ValueEntry {
    pub const FIELD: &'static str = "Field";
    pub const OPERATION: &'static str = "Operation";
    pub const MODIFIER: &'static str = "Modifier";
    pub const ORDER: &'static str = "Order";
    pub const DIRECTION: &'static str = "Direction";
    pub const DATE_AGGREGATION: &'static str = "DateAggregation";
    pub const ARRAY_LIMIT: &'static str = "ArrayLimit";
    pub const ALIAS: &'static str = "Alias";
}

impl Schema for ValueEntry {
    const KIND: &'static str = "value";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(Self::FIELD),
        FieldSpec::optional(Self::OPERATION),
        FieldSpec::optional(Self::MODIFIER),
        FieldSpec::optional(Self::ORDER),
        FieldSpec::optional(Self::DIRECTION),
        FieldSpec::optional(Self::DATE_AGGREGATION),
        FieldSpec::optional(Self::ARRAY_LIMIT),
        FieldSpec::optional(Self::ALIAS),
    ];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            field: fields.required_non_empty_str(Self::FIELD)?,
            operation: fields.optional_str(Self::OPERATION)?,
            modifier: fields.optional_str(Self::MODIFIER)?,
            order: fields.optional_str(Self::ORDER)?,
            direction: fields.optional_str(Self::DIRECTION)?,
            date_aggregation: fields.optional_parsed(
                Self::DATE_AGGREGATION,
                DATE_BUCKET,
                DateBucket::from_str,
            )?,
            array_limit: fields.optional_u64(Self::ARRAY_LIMIT)?,
            alias: fields.optional_str(Self::ALIAS)?,
        })
    }
}
