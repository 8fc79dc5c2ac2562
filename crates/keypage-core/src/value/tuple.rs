use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// KeysetTuple
///
/// One row's projection onto the active sort columns, in sort-column order.
/// Used as a page boundary marker on both sides of the wire.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, Hash, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
pub struct KeysetTuple(Vec<Value>);

impl KeysetTuple {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for KeysetTuple {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for KeysetTuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Value; N]> for KeysetTuple {
    fn from(values: [Value; N]) -> Self {
        Self(values.into())
    }
}
