//! Projection fields and ordered field collections.
//!
//! A [`Field`] is one rendered column of a `SELECT` (or `GROUP BY`) list.
//! Fields are only created through [`FieldCollection::add_field`], which
//! hands out sequential indexes and derives the display handle:
//!
//! | operation | alias | handle                   |
//! |-----------|-------|--------------------------|
//! | -         | -     | `name`                   |
//! | -         | `a`   | `name AS a`              |
//! | `OP`      | -     | `OP(name)`               |
//! | `OP`      | `a`   | `OP(name) AS a`          |

use super::function::{AggregationFunction, SqlFunction};
use super::token::Token;

/// One projection column.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    index: usize,
    alias: Option<String>,
    handle: String,
    modifier: Option<String>,
    order: Option<String>,
    limit: Option<u64>,
}

impl Field {
    /// Source expression text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based position within the owning collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Output alias after collision resolution, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Rendered text of this column.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Column name as seen in the result set: the alias when set,
    /// otherwise the source expression.
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn to_token(&self) -> Token {
        Token::Raw(self.handle.clone())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.handle)
    }
}

/// Append-only, index-ordered collection of fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCollection {
    fields: Vec<Field>,
}

impl FieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field and return its index.
    ///
    /// An explicit alias already used by an earlier field in this
    /// collection is made unique as `<alias>_<index>`.
    pub fn add_field(
        &mut self,
        name: &str,
        alias: Option<&str>,
        operation: Option<AggregationFunction>,
        modifier: Option<&str>,
        order: Option<&str>,
        limit: Option<u64>,
    ) -> usize {
        let index = self.fields.len();
        let alias = alias.map(|a| self.unique_alias(a, index));

        let expression = match operation {
            Some(op) => op.apply(name),
            None => name.to_string(),
        };
        let handle = match &alias {
            Some(a) => format!("{} AS {}", expression, a),
            None => expression,
        };

        self.fields.push(Field {
            name: name.to_string(),
            index,
            alias,
            handle,
            modifier: modifier.map(str::to_string),
            order: order.map(str::to_string),
            limit,
        });
        index
    }

    fn unique_alias(&self, alias: &str, index: usize) -> String {
        let taken = |candidate: &str| self.fields.iter().any(|f| f.alias() == Some(candidate));
        if !taken(alias) {
            return alias.to_string();
        }

        let base = format!("{}_{}", alias, index);
        let derived = std::iter::once(base.clone())
            .chain((1..).map(|n| format!("{}_{}", base, n)))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.clone());
        log::debug!("alias '{}' already in use, renamed to '{}'", alias, derived);
        derived
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// All fields in index order.
    pub fn all(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.fields.iter().map(Field::to_token)
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
