//! Function renderers: symbolic operation names to dialect keywords.
//!
//! Callers name functions symbolically (`ANY`, `COUNT`, `ROW_NUMBER`). Each
//! family owns a closed allow-list; a name outside it is rejected with
//! [`FunctionError::Unsupported`]. Lookup is exact and case-sensitive, and
//! it matches the symbolic name, never the rendered keyword (`ANY` is
//! accepted, `ANY_VALUE` is not).

use super::token::{Token, TokenStream};

/// Function family, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFamily {
    Aggregation,
    Numbering,
}

impl std::fmt::Display for FunctionFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionFamily::Aggregation => write!(f, "Aggregation"),
            FunctionFamily::Numbering => write!(f, "Numbering"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("{family} function '{name}' not supported")]
    Unsupported { family: FunctionFamily, name: String },
}

impl FunctionError {
    /// The rejected symbolic name.
    pub fn name(&self) -> &str {
        match self {
            FunctionError::Unsupported { name, .. } => name,
        }
    }
}

/// Common behaviour of the function families.
pub trait SqlFunction: Copy + Sized {
    const FAMILY: FunctionFamily;

    /// Resolve a symbolic name against this family's allow-list.
    fn lookup(name: &str) -> Option<Self>;

    /// The dialect keyword this function renders as.
    fn keyword(&self) -> &'static str;

    /// Resolve a symbolic name, failing for names outside the allow-list.
    fn parse(name: &str) -> Result<Self, FunctionError> {
        Self::lookup(name).ok_or_else(|| {
            let err = FunctionError::Unsupported {
                family: Self::FAMILY,
                name: name.to_string(),
            };
            log::error!("{}", err);
            err
        })
    }

    /// `KEYWORD(<expression>)` as tokens.
    fn to_tokens(&self, expression: &TokenStream) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::FunctionName(self.keyword()))
            .lparen()
            .append(expression)
            .rparen();
        ts
    }

    /// `KEYWORD(<expression>)` for an already-rendered expression.
    fn apply(&self, expression: &str) -> String {
        format!("{}({})", self.keyword(), expression)
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationFunction {
    Any,
    ArrayAgg,
    Avg,
    Count,
    Min,
    Max,
    Sum,
}

impl AggregationFunction {
    pub const ALL: [AggregationFunction; 7] = [
        AggregationFunction::Any,
        AggregationFunction::ArrayAgg,
        AggregationFunction::Avg,
        AggregationFunction::Count,
        AggregationFunction::Min,
        AggregationFunction::Max,
        AggregationFunction::Sum,
    ];

    /// The caller-facing symbolic name.
    pub fn symbol(&self) -> &'static str {
        match self {
            AggregationFunction::Any => "ANY",
            AggregationFunction::ArrayAgg => "ARRAY_AGG",
            AggregationFunction::Avg => "AVG",
            AggregationFunction::Count => "COUNT",
            AggregationFunction::Min => "MIN",
            AggregationFunction::Max => "MAX",
            AggregationFunction::Sum => "SUM",
        }
    }
}

impl SqlFunction for AggregationFunction {
    const FAMILY: FunctionFamily = FunctionFamily::Aggregation;

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.symbol() == name)
    }

    fn keyword(&self) -> &'static str {
        match self {
            AggregationFunction::Any => "ANY_VALUE",
            other => other.symbol(),
        }
    }
}

/// Numbering (ranking) window functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingFunction {
    DenseRank,
    Rank,
    RowNumber,
}

impl NumberingFunction {
    pub const ALL: [NumberingFunction; 3] = [
        NumberingFunction::DenseRank,
        NumberingFunction::Rank,
        NumberingFunction::RowNumber,
    ];
}

impl SqlFunction for NumberingFunction {
    const FAMILY: FunctionFamily = FunctionFamily::Numbering;

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.keyword() == name)
    }

    fn keyword(&self) -> &'static str {
        match self {
            NumberingFunction::DenseRank => "DENSE_RANK",
            NumberingFunction::Rank => "RANK",
            NumberingFunction::RowNumber => "ROW_NUMBER",
        }
    }
}
