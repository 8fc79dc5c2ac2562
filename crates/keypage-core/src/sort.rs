//! Module: sort
//! Responsibility: the ordered column list that gives keyset positions meaning.
//! Does not own: token bytes or paging decisions.

use crate::{
    MAX_KEYSET_LEN,
    value::{KeysetTuple, Value},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet};
use thiserror::Error as ThisError;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient a natural-order comparison for this direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

///
/// SortField
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortField {
    pub field: String,
    pub direction: OrderDirection,
}

///
/// SortSpecError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SortSpecError {
    #[error("sort specification must name at least one field")]
    Empty,

    #[error("sort specification has {count} fields (max {max})")]
    TooManyFields { count: usize, max: usize },

    #[error("sort field at position {position} has an empty name")]
    EmptyField { position: usize },

    #[error("sort field '{field}' appears more than once")]
    DuplicateField { field: String },
}

///
/// KeysetProjectionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum KeysetProjectionError {
    #[error("row has no value for sort field '{field}'")]
    MissingField { field: String },
}

///
/// KeysetRow
///
/// Row view the sort spec projects keysets from.
///

pub trait KeysetRow {
    /// Value of one sort field, or `None` when the row lacks it.
    fn keyset_value(&self, field: &str) -> Option<Value>;
}

///
/// SortSpec
///
/// Ordered, non-empty sort columns. Column *i* is the meaning of keyset
/// element *i*. Immutable once built.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortSpec {
    fields: Vec<SortField>,
}

impl SortSpec {
    /// Build a validated sort spec.
    pub fn new<I, F>(fields: I) -> Result<Self, SortSpecError>
    where
        I: IntoIterator<Item = (F, OrderDirection)>,
        F: Into<String>,
    {
        let fields: Vec<SortField> = fields
            .into_iter()
            .map(|(field, direction)| SortField {
                field: field.into(),
                direction,
            })
            .collect();

        if fields.is_empty() {
            return Err(SortSpecError::Empty);
        }
        if fields.len() > MAX_KEYSET_LEN {
            return Err(SortSpecError::TooManyFields {
                count: fields.len(),
                max: MAX_KEYSET_LEN,
            });
        }

        let mut seen = BTreeSet::new();
        for (position, sort_field) in fields.iter().enumerate() {
            if sort_field.field.is_empty() {
                return Err(SortSpecError::EmptyField { position });
            }
            if !seen.insert(sort_field.field.as_str()) {
                return Err(SortSpecError::DuplicateField {
                    field: sort_field.field.clone(),
                });
            }
        }

        Ok(Self { fields })
    }

    #[must_use]
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// Number of columns; every keyset under this spec has this arity.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    // A validated spec is never empty; kept for clippy's len_without_is_empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Same columns with every direction flipped.
    ///
    /// Backward pages are fetched in this order and then reversed for display.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|sort_field| SortField {
                    field: sort_field.field.clone(),
                    direction: sort_field.direction.reversed(),
                })
                .collect(),
        }
    }

    /// Project one row onto the sort columns.
    pub fn project<R: KeysetRow + ?Sized>(
        &self,
        row: &R,
    ) -> Result<KeysetTuple, KeysetProjectionError> {
        self.fields
            .iter()
            .map(|sort_field| {
                row.keyset_value(&sort_field.field)
                    .ok_or_else(|| KeysetProjectionError::MissingField {
                        field: sort_field.field.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(KeysetTuple::new)
    }

    /// Compare two keysets under this spec's directions.
    ///
    /// Returns `None` when the tuples disagree in arity or a position holds
    /// values of different kinds.
    #[must_use]
    pub fn compare(&self, left: &KeysetTuple, right: &KeysetTuple) -> Option<Ordering> {
        if left.len() != self.len() || right.len() != self.len() {
            return None;
        }

        for ((sort_field, l), r) in self.fields.iter().zip(left.iter()).zip(right.iter()) {
            let ordering = sort_field.direction.apply(l.cmp_same_kind(r)?);
            if ordering != Ordering::Equal {
                return Some(ordering);
            }
        }

        Some(Ordering::Equal)
    }
}

///
/// TESTS
///
