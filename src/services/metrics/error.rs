use super::MetricKind;

/// Errors returned while declaring or recording metrics
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("metric '{0}' already exists")]
    DuplicateMetricName(String),

    #[error("metric name cannot be empty")]
    EmptyMetricName,

    #[error("metric type '{0}' does not exist")]
    UnknownMetricType(i32),

    #[error("metric '{0}' is histogram type, cannot lose bucket param")]
    MissingBucketParameter(String),

    #[error("metric '{0}' is summary type, cannot lose objectives param")]
    MissingObjectivesParameter(String),

    #[error("exporter rejected metric '{name}': {source}")]
    ExporterRegistrationFailed {
        name: String,
        #[source]
        source: prometheus::Error,
    },

    #[error("metric not found")]
    MetricNotFound,

    #[error("metric '{name}' is {kind} type, cannot {op}")]
    UnsupportedOperation {
        name: String,
        kind: MetricKind,
        op: &'static str,
    },

    #[error("collector error: {0}")]
    Collector(#[from] prometheus::Error),

    #[error("failed to encode metrics: {0}")]
    Encode(String),
}
