//! Metrics sink boundary.
//!
//! Index construction MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, EventState};
use std::{cell::RefCell, sync::Arc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Arc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent<'a> {
    IndexBuildStart {
        index: &'a str,
        unique: bool,
    },
    IndexBuildFinish {
        index: &'a str,
        rows_scanned: u64,
        entries: u64,
        ok: bool,
    },
    UniqueViolation {
        index: &'a str,
    },
    IndexCreated {
        index: &'a str,
    },
    IndexReplaced {
        index: &'a str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::IndexBuildStart { index, unique } => {
                metrics::with_state_mut(|m| {
                    m.ops.index_builds = m.ops.index_builds.saturating_add(1);
                    if unique {
                        m.ops.unique_index_builds = m.ops.unique_index_builds.saturating_add(1);
                    }
                    let entry = metrics::index_entry(m, index);
                    entry.builds = entry.builds.saturating_add(1);
                });
            }

            MetricsEvent::IndexBuildFinish {
                index,
                rows_scanned,
                entries,
                ok,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    m.ops.index_entries = m.ops.index_entries.saturating_add(entries);
                    if !ok {
                        m.ops.failed_builds = m.ops.failed_builds.saturating_add(1);
                    }

                    let entry = metrics::index_entry(m, index);
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows_scanned);
                    entry.entries = entry.entries.saturating_add(entries);
                    if !ok {
                        entry.failed_builds = entry.failed_builds.saturating_add(1);
                    }
                });
            }

            MetricsEvent::UniqueViolation { index } => {
                metrics::with_state_mut(|m| {
                    m.ops.unique_violations = m.ops.unique_violations.saturating_add(1);
                    let entry = metrics::index_entry(m, index);
                    entry.unique_violations = entry.unique_violations.saturating_add(1);
                });
            }

            MetricsEvent::IndexCreated { index } => {
                metrics::with_state_mut(|m| {
                    m.ops.indexes_created = m.ops.indexes_created.saturating_add(1);
                    let entry = metrics::index_entry(m, index);
                    entry.created = entry.created.saturating_add(1);
                });
            }

            MetricsEvent::IndexReplaced { index } => {
                metrics::with_state_mut(|m| {
                    m.ops.indexes_replaced = m.ops.indexes_replaced.saturating_add(1);
                    let entry = metrics::index_entry(m, index);
                    entry.replaced = entry.replaced.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) fn record(event: MetricsEvent<'_>) {
    // Clone out of the slot so a sink may itself install overrides.
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GlobalMetricsSink.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> EventState {
    metrics::with_state(Clone::clone)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Arc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Arc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// BuildSpan
/// RAII guard that emits start/finish events for one index build.
/// A span dropped without `finish` records a failed build.

pub(crate) struct BuildSpan<'a> {
    index: &'a str,
    rows_scanned: u64,
    entries: u64,
    ok: bool,
}

impl<'a> BuildSpan<'a> {
    #[must_use]
    pub(crate) fn new(index: &'a str, unique: bool) -> Self {
        record(MetricsEvent::IndexBuildStart { index, unique });

        Self {
            index,
            rows_scanned: 0,
            entries: 0,
            ok: false,
        }
    }

    pub(crate) const fn row_scanned(&mut self) {
        self.rows_scanned = self.rows_scanned.saturating_add(1);
    }

    pub(crate) fn unique_violation(&self) {
        record(MetricsEvent::UniqueViolation { index: self.index });
    }

    pub(crate) fn finish(mut self, entries: usize) {
        self.entries = u64::try_from(entries).unwrap_or(u64::MAX);
        self.ok = true;
    }
}

impl Drop for BuildSpan<'_> {
    fn drop(&mut self) {
        record(MetricsEvent::IndexBuildFinish {
            index: self.index,
            rows_scanned: self.rows_scanned,
            entries: self.entries,
            ok: self.ok,
        });
    }
}
