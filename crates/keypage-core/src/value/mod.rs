mod scalar;
mod tuple;


pub use scalar::ScalarTag;
pub use tuple::KeysetTuple;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Value
///
/// Field value vocabulary exchanged with the data layer.
///
/// Only variants backed by a scalar registry entry can travel inside a cursor
/// token; the rest exist so that a data layer projecting an unsupported column
/// can be reported instead of silently coerced.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Int32(i32),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    /// Stable variant label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Int32(_) => "Int32",
            Self::Null => "Null",
            Self::Text(_) => "Text",
            Self::Uint(_) => "Uint",
        }
    }

    /// Registry entry for this value, if it can be written into a token.
    #[must_use]
    pub fn scalar_tag(&self) -> Option<ScalarTag> {
        ScalarTag::for_value(self)
    }

    /// Compare two values of the same variant.
    ///
    /// Returns `None` across variants; there is no implicit widening between
    /// `Int` and `Int32`. `Null` only compares equal to `Null`.
    #[must_use]
    pub fn cmp_same_kind(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int32(a), Self::Int32(b)) => Some(a.cmp(b)),
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
