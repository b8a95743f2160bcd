use http_monitor::services::metrics::{Metric, MetricError, MetricKind, Monitor};
use prometheus::{CounterVec, Opts};

// =============================================================================
// INTEGRATION TESTS - METRIC REGISTRATION
// =============================================================================

#[test]
fn test_counter_and_gauge_lookup() {
    let monitor = Monitor::new();

    monitor
        .add_metric(Metric::new("jobs_total", MetricKind::Counter).description("jobs run"))
        .unwrap();
    monitor
        .add_metric(Metric::new("queue_depth", MetricKind::Gauge).labels(["queue"]))
        .unwrap();

    let counter = monitor.get_metric("jobs_total");
    assert_eq!(counter.name, "jobs_total");
    assert_eq!(counter.kind, MetricKind::Counter);
    assert!(counter.is_registered());

    let gauge = monitor.get_metric("queue_depth");
    assert_eq!(gauge.name, "queue_depth");
    assert_eq!(gauge.kind, MetricKind::Gauge);
    assert_eq!(gauge.labels, vec!["queue".to_string()]);
}

#[test]
fn test_duplicate_name_rejected_and_entry_kept() {
    let monitor = Monitor::new();
    monitor
        .add_metric(
            Metric::new("http_requests", MetricKind::Counter).labels(["method", "path"]),
        )
        .unwrap();

    let err = monitor
        .add_metric(Metric::new("http_requests", MetricKind::Gauge))
        .unwrap_err();
    assert!(matches!(err, MetricError::DuplicateMetricName(ref name) if name == "http_requests"));

    let existing = monitor.get_metric("http_requests");
    assert_eq!(existing.kind, MetricKind::Counter);
    assert_eq!(existing.labels, vec!["method".to_string(), "path".to_string()]);
    assert_eq!(monitor.metric_count(), 1);
}

#[test]
fn test_empty_name_rejected() {
    let monitor = Monitor::new();
    let err = monitor
        .add_metric(Metric::new("", MetricKind::Counter))
        .unwrap_err();
    assert!(matches!(err, MetricError::EmptyMetricName));
    assert_eq!(monitor.metric_count(), 0);
}

#[test]
fn test_duplicate_checked_before_kind() {
    let monitor = Monitor::new();
    monitor
        .add_metric(Metric::new("busy", MetricKind::Gauge))
        .unwrap();

    // an invalid kind on an existing name still reports the duplicate
    let err = monitor
        .add_metric(Metric::new("busy", MetricKind::None))
        .unwrap_err();
    assert!(matches!(err, MetricError::DuplicateMetricName(_)));
}

#[test]
fn test_none_kind_rejected() {
    let monitor = Monitor::new();
    let err = monitor
        .add_metric(Metric::new("unset", MetricKind::None))
        .unwrap_err();
    assert!(matches!(err, MetricError::UnknownMetricType(0)));
    assert!(monitor.find_metric("unset").is_none());
}

#[test]
fn test_out_of_range_kind_rejected() {
    let err = MetricKind::try_from(42).unwrap_err();
    assert!(matches!(err, MetricError::UnknownMetricType(42)));
    assert_eq!(err.to_string(), "metric type '42' does not exist");
}

#[test]
fn test_histogram_missing_buckets_then_success() {
    let monitor = Monitor::new();

    let err = monitor
        .add_metric(Metric::new("req_latency", MetricKind::Histogram).buckets(vec![]))
        .unwrap_err();
    assert!(matches!(err, MetricError::MissingBucketParameter(ref name) if name == "req_latency"));
    assert!(monitor.find_metric("req_latency").is_none());

    monitor
        .add_metric(
            Metric::new("req_latency", MetricKind::Histogram).buckets(vec![0.1, 0.5, 1.0]),
        )
        .unwrap();
    assert_eq!(monitor.get_metric("req_latency").kind, MetricKind::Histogram);
}

#[test]
fn test_summary_missing_objectives() {
    let monitor = Monitor::new();

    let err = monitor
        .add_metric(Metric::new("rpc_latency", MetricKind::Summary))
        .unwrap_err();
    assert!(matches!(err, MetricError::MissingObjectivesParameter(_)));
    assert!(monitor.find_metric("rpc_latency").is_none());

    monitor
        .add_metric(
            Metric::new("rpc_latency", MetricKind::Summary)
                .objectives(vec![(0.5, 0.05), (0.9, 0.01)]),
        )
        .unwrap();
    assert_eq!(monitor.get_metric("rpc_latency").kind, MetricKind::Summary);
}

#[test]
fn test_missing_metric_is_sentinel() {
    let monitor = Monitor::new();

    assert!(monitor.find_metric("never_added").is_none());

    let metric = monitor.get_metric("never_added");
    assert_eq!(metric.kind, MetricKind::None);
    assert_eq!(metric.name, "");
    assert!(!metric.is_registered());
}

#[test]
fn test_exporter_collision_reported() {
    let monitor = Monitor::new();

    // registered behind the monitor's back
    let foreign = CounterVec::new(Opts::new("shadowed_total", "foreign"), &[]).unwrap();
    monitor.registry().register(Box::new(foreign)).unwrap();

    let err = monitor
        .add_metric(Metric::new("shadowed_total", MetricKind::Counter))
        .unwrap_err();
    assert!(matches!(
        err,
        MetricError::ExporterRegistrationFailed { ref name, .. } if name == "shadowed_total"
    ));
    assert!(monitor.find_metric("shadowed_total").is_none());
}

#[test]
fn test_independent_monitors_do_not_share_state() {
    let first = Monitor::new();
    let second = Monitor::new();

    first
        .add_metric(Metric::new("shared_name", MetricKind::Counter))
        .unwrap();
    second
        .add_metric(Metric::new("shared_name", MetricKind::Gauge))
        .unwrap();

    assert_eq!(first.get_metric("shared_name").kind, MetricKind::Counter);
    assert_eq!(second.get_metric("shared_name").kind, MetricKind::Gauge);
}

#[test]
fn test_builtin_metrics_registered() {
    let monitor = Monitor::new();
    monitor.set_metric_prefix("svc_");
    monitor.set_duration(vec![0.5, 1.0]);
    monitor.register_builtin_metrics().unwrap();

    assert_eq!(monitor.metric_count(), 7);

    let duration = monitor.get_metric("svc_http_request_duration");
    assert_eq!(duration.kind, MetricKind::Histogram);
    assert_eq!(duration.buckets, vec![0.5, 1.0]);
    assert_eq!(duration.labels, vec!["uri".to_string()]);

    let slow = monitor.get_metric("svc_http_slow_request_total");
    assert_eq!(slow.kind, MetricKind::Counter);
    assert!(slow.description.contains("t=5"));

    // a second call collides with the first
    assert!(matches!(
        monitor.register_builtin_metrics(),
        Err(MetricError::DuplicateMetricName(_))
    ));
}

#[test]
fn test_summary_duplicate_quantiles_rejected() {
    let monitor = Monitor::new();

    let err = monitor
        .add_metric(
            Metric::new("dup_latency", MetricKind::Summary)
                .objectives(vec![(0.5, 0.05), (0.5, 0.01)]),
        )
        .unwrap_err();
    assert!(matches!(err, MetricError::Collector(_)));
    assert!(monitor.find_metric("dup_latency").is_none());
    assert!(monitor.registry().gather().is_empty());
}
