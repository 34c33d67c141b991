//! Clause collections: per-entry validation of `GROUP_BY` and `VALUES`.
//!
//! Each raw array element is validated on its own. Entries that fail are
//! recorded as [`SkippedEntry`] and logged; they never fail the batch.
//! Positions are compacted over the entries that validated, so a dropped
//! entry shifts later entries down by one. The original array index is
//! kept on every [`Clause`] as `source_index`.

use serde_json::Value;

use super::record::{GroupByEntry, ValueEntry};
use super::schema::{Schema, SchemaError};

/// One validated entry with its positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause<T> {
    /// Zero-based position among validated entries.
    pub position: usize,
    /// Index of the entry in the raw array.
    pub source_index: usize,
    pub entry: T,
}

/// A raw entry that failed validation and was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub source_index: usize,
    pub error: SchemaError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseCollection<T> {
    clauses: Vec<Clause<T>>,
    skipped: Vec<SkippedEntry>,
}

pub type GroupByClauses = ClauseCollection<GroupByEntry>;
pub type ValueClauses = ClauseCollection<ValueEntry>;

impl<T> Default for ClauseCollection<T> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T: Schema> ClauseCollection<T> {
    /// Validate every element of `raw`. An absent array gives an empty
    /// collection.
    pub fn from_raw(raw: Option<&[Value]>) -> Self {
        raw.unwrap_or_default()
            .iter()
            .enumerate()
            .fold(Self::default(), |mut acc, (source_index, value)| {
                match T::validate(value) {
                    Ok(entry) => acc.clauses.push(Clause {
                        position: acc.clauses.len(),
                        source_index,
                        entry,
                    }),
                    Err(error) => {
                        log::warn!(
                            "skipping {} entry at index {}: {}",
                            T::KIND,
                            source_index,
                            error
                        );
                        acc.skipped.push(SkippedEntry {
                            source_index,
                            error,
                        });
                    }
                }
                acc
            })
    }
}

impl<T> ClauseCollection<T> {
    /// Validated entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.clauses.iter().map(|c| &c.entry)
    }

    /// Validated entries with their positions.
    pub fn clauses(&self) -> &[Clause<T>] {
        &self.clauses
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.clauses.get(position).map(|c| &c.entry)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }
}
