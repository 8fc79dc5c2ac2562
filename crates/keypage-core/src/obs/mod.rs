//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! The cursor codec stays pure; the planner and link builder report what they
//! did through `MetricsEvent`s. Install a sink with `with_metrics_sink` to
//! forward events elsewhere, or read the default counters with
//! `metrics_report`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
