use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// In-memory paging counters for the current thread, plus the window start.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub since_ms: u64,
}

impl EventState {
    fn fresh() -> Self {
        Self {
            ops: EventOps::default(),
            since_ms: now_millis(),
        }
    }
}

impl Default for EventState {
    fn default() -> Self {
        Self::fresh()
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Cursor tokens
    pub cursors_decoded: u64,
    pub cursors_rejected: u64,
    pub cursors_encoded: u64,
    pub rejections: BTreeMap<String, u64>,

    // Planner kinds
    pub plan_first: u64,
    pub plan_forward: u64,
    pub plan_backward: u64,

    // Links
    pub link_builds: u64,
    pub links_previous: u64,
    pub links_next: u64,
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Counters accumulated since `since_ms`; absent when filtered out.
    pub counters: Option<EventState>,
}

thread_local! {
    static COUNTERS: RefCell<EventState> = RefCell::new(EventState::fresh());
}

pub(crate) fn read_counters<R>(f: impl FnOnce(&EventState) -> R) -> R {
    COUNTERS.with(|cell| f(&cell.borrow()))
}

pub(crate) fn update_counters<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    COUNTERS.with(|cell| f(&mut cell.borrow_mut()))
}

/// Zero every counter and restart the window.
pub(crate) fn reset_all() {
    update_counters(|state| *state = EventState::fresh());
}

/// Snapshot counters, optionally only if the window started at or after
/// `window_start_ms`.
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    read_counters(|state| {
        let in_window = window_start_ms.is_none_or(|start| state.since_ms >= start);

        EventReport {
            counters: in_window.then(|| state.clone()),
        }
    })
}

// Wall clock in milliseconds; a clock before the epoch reads as zero.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}
