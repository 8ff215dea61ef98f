use crate::obs::{
    MetricsEvent, MetricsSink, metrics_report, metrics_reset_all,
    sink::{BuildSpan, record},
    with_metrics_sink,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CaptureSink {
    events: Mutex<Vec<String>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent<'_>) {
        self.events.lock().unwrap().push(format!("{event:?}"));
    }
}

#[test]
fn finished_span_counts_rows_and_entries() {
    metrics_reset_all();

    let mut span = BuildSpan::new("by_name", true);
    span.row_scanned();
    span.row_scanned();
    span.finish(2);

    let report = metrics_report();
    assert_eq!(report.ops.index_builds, 1);
    assert_eq!(report.ops.unique_index_builds, 1);
    assert_eq!(report.ops.rows_scanned, 2);
    assert_eq!(report.ops.index_entries, 2);
    assert_eq!(report.ops.failed_builds, 0);
    assert_eq!(report.indexes["by_name"].builds, 1);
}

#[test]
fn dropped_span_records_failed_build() {
    metrics_reset_all();

    {
        let mut span = BuildSpan::new("by_email", false);
        span.row_scanned();
    }

    let report = metrics_report();
    assert_eq!(report.ops.failed_builds, 1);
    assert_eq!(report.indexes["by_email"].failed_builds, 1);
    assert_eq!(report.indexes["by_email"].rows_scanned, 1);
}

#[test]
fn scoped_sink_captures_and_restores() {
    metrics_reset_all();
    let sink = Arc::new(CaptureSink::default());

    with_metrics_sink(sink.clone(), || {
        record(MetricsEvent::IndexCreated { index: "ab" });
    });
    record(MetricsEvent::IndexReplaced { index: "ab" });

    let events = sink.events.lock().unwrap().clone();
    assert_eq!(events, vec![r#"IndexCreated { index: "ab" }"#.to_string()]);

    let report = metrics_report();
    assert_eq!(report.ops.indexes_created, 0);
    assert_eq!(report.ops.indexes_replaced, 1);
}

#[test]
fn report_serializes_to_json() {
    metrics_reset_all();
    record(MetricsEvent::UniqueViolation { index: "u" });

    let json = serde_json::to_value(metrics_report()).unwrap();
    assert_eq!(json["ops"]["unique_violations"], 1);
    assert_eq!(json["indexes"]["u"]["unique_violations"], 1);
}
