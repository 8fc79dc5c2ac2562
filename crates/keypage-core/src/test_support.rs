use crate::{
    cursor::{CursorToken, encode_cursor},
    obs::{MetricsEvent, MetricsSink},
    sort::{OrderDirection, SortSpec},
    value::{KeysetTuple, Value},
};
use std::cell::RefCell;

/// `age ASC, id DESC`, the two-column spec most tests page over.
pub(crate) fn age_asc_id_desc() -> SortSpec {
    SortSpec::new([("age", OrderDirection::Asc), ("id", OrderDirection::Desc)])
        .expect("test sort spec should build")
}

pub(crate) fn keyset(age: i32, id: i64) -> KeysetTuple {
    KeysetTuple::from([Value::Int32(age), Value::Int(id)])
}

pub(crate) fn token(tuple: &KeysetTuple) -> CursorToken {
    encode_cursor(tuple).expect("test keyset should encode")
}

///
/// RecordingSink
/// Captures every metrics event for assertions.
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<MetricsEvent> {
        self.events.borrow().clone()
    }
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}
