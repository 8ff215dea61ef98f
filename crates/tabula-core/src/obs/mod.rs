//! Observability: index-build telemetry and sink abstractions.
//!
//! Counters are thread-local; each build reports on the thread that runs it.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventState, IndexCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
