//! Paging event sink.
//!
//! Planner and link code report through `record` only; nothing outside this
//! module touches `obs::metrics` state. A scoped sink installed with
//! `with_metrics_sink` takes precedence over the thread-local counters.
use crate::{
    obs::metrics::{self, EventReport},
    plan::{CursorParam, PageKind},
};
use std::cell::Cell;

thread_local! {
    static SCOPED_SINK: Cell<Option<*const dyn MetricsSink>> = const { Cell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CursorDecoded {
        param: CursorParam,
    },
    CursorRejected {
        param: CursorParam,
        reason: &'static str,
    },
    CursorEncoded {
        param: CursorParam,
    },
    PagePlanned {
        kind: PageKind,
    },
    LinksBuilt {
        previous: bool,
        next: bool,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// CounterSink
/// Folds events into the thread-local counters; used when no scoped sink is set.
///

pub(crate) struct CounterSink;

impl MetricsSink for CounterSink {
    fn record(&self, event: MetricsEvent) {
        metrics::update_counters(|state| {
            let ops = &mut state.ops;
            let bump = |counter: &mut u64| *counter = counter.saturating_add(1);

            match event {
                MetricsEvent::CursorDecoded { .. } => bump(&mut ops.cursors_decoded),
                MetricsEvent::CursorRejected { reason, .. } => {
                    bump(&mut ops.cursors_rejected);
                    bump(ops.rejections.entry(reason.to_string()).or_default());
                }
                MetricsEvent::CursorEncoded { .. } => bump(&mut ops.cursors_encoded),
                MetricsEvent::PagePlanned { kind } => bump(match kind {
                    PageKind::First => &mut ops.plan_first,
                    PageKind::Forward => &mut ops.plan_forward,
                    PageKind::Backward => &mut ops.plan_backward,
                }),
                MetricsEvent::LinksBuilt { previous, next } => {
                    bump(&mut ops.link_builds);
                    if previous {
                        bump(&mut ops.links_previous);
                    }
                    if next {
                        bump(&mut ops.links_next);
                    }
                }
            }
        });
    }
}

pub(crate) fn record(event: MetricsEvent) {
    match SCOPED_SINK.get() {
        // SAFETY: the pointer was taken from a live `&dyn MetricsSink` by
        // `with_metrics_sink`, whose guard clears or restores the slot before
        // that borrow ends (unwinding included). It is only read here, for
        // the duration of this synchronous call.
        Some(ptr) => unsafe { (*ptr).record(event) },
        None => CounterSink.record(event),
    }
}

/// Snapshot the thread-local counters.
///
/// `window_start_ms` filters on when the counters were last reset
/// (`EventState::since_ms`), not on individual events.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Zero the thread-local counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Route every event raised on this thread while `f` runs to `sink`.
///
/// Calls nest; the previous sink comes back when `f` returns or unwinds.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Restore(Option<*const dyn MetricsSink>);

    impl Drop for Restore {
        fn drop(&mut self) {
            SCOPED_SINK.set(self.0);
        }
    }

    // SAFETY: only the lifetime is erased. `Restore` removes the pointer from
    // the slot before `sink` goes out of scope, and `record` never keeps it.
    let erased = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let _restore = Restore(SCOPED_SINK.replace(Some(erased)));

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSink;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    const FIRST_PAGE: MetricsEvent = MetricsEvent::PagePlanned {
        kind: PageKind::First,
    };
    const BACKWARD_PAGE: MetricsEvent = MetricsEvent::PagePlanned {
        kind: PageKind::Backward,
    };

    #[test]
    fn nested_sinks_receive_only_their_own_scope() {
        SCOPED_SINK.set(None);
        let outer = RecordingSink::default();
        let inner = RecordingSink::default();

        with_metrics_sink(&outer, || {
            record(FIRST_PAGE);
            with_metrics_sink(&inner, || record(BACKWARD_PAGE));
            record(FIRST_PAGE);
        });

        assert_eq!(outer.events(), vec![FIRST_PAGE, FIRST_PAGE]);
        assert_eq!(inner.events(), vec![BACKWARD_PAGE]);
        assert!(SCOPED_SINK.get().is_none());
    }

    #[test]
    fn scoped_sink_is_cleared_when_closure_panics() {
        SCOPED_SINK.set(None);
        let sink = RecordingSink::default();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(&sink, || {
                record(FIRST_PAGE);
                panic!("handler failed mid-page");
            });
        }));

        assert!(outcome.is_err());
        assert_eq!(sink.events(), vec![FIRST_PAGE]);
        assert!(SCOPED_SINK.get().is_none());
    }

    #[test]
    fn counters_fold_rejections_by_reason() {
        SCOPED_SINK.set(None);
        metrics_reset_all();

        record(BACKWARD_PAGE);
        for param in [CursorParam::After, CursorParam::Before] {
            record(MetricsEvent::CursorRejected {
                param,
                reason: "arity_mismatch",
            });
        }
        record(MetricsEvent::CursorRejected {
            param: CursorParam::After,
            reason: "trailing_bytes",
        });
        record(MetricsEvent::LinksBuilt {
            previous: true,
            next: false,
        });

        let ops = metrics_report(None)
            .counters
            .expect("unfiltered report carries counters")
            .ops;
        assert_eq!(ops.plan_backward, 1);
        assert_eq!(ops.cursors_rejected, 3);
        assert_eq!(ops.rejections.get("arity_mismatch"), Some(&2));
        assert_eq!(ops.rejections.get("trailing_bytes"), Some(&1));
        assert_eq!((ops.link_builds, ops.links_previous, ops.links_next), (1, 1, 0));
    }

    #[test]
    fn scoped_sink_bypasses_counters() {
        SCOPED_SINK.set(None);
        metrics_reset_all();
        let sink = RecordingSink::default();

        with_metrics_sink(&sink, || record(FIRST_PAGE));

        let ops = metrics_report(None)
            .counters
            .expect("unfiltered report carries counters")
            .ops;
        assert_eq!(ops.plan_first, 0);
    }

    #[test]
    fn report_filters_on_window_start() {
        metrics_reset_all();
        let since = metrics_report(None)
            .counters
            .expect("unfiltered report carries counters")
            .since_ms;

        assert!(metrics_report(Some(since)).counters.is_some());
        assert!(metrics_report(Some(since + 1)).counters.is_none());
    }
}
