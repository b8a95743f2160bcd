use prometheus::core::Collector;
use prometheus::{CounterVec, GaugeVec, HistogramOpts, HistogramVec, Opts};
use std::fmt;

use super::summary::{SummaryOpts, SummaryVec};
use super::{Metric, MetricError, MetricKind};

/// Underlying collector handle, one variant per registrable kind
#[derive(Clone)]
pub enum MetricVec {
    Counter(CounterVec),
    Gauge(GaugeVec),
    Histogram(HistogramVec),
    Summary(SummaryVec),
}

impl fmt::Debug for MetricVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetricVec::{}", self.kind())
    }
}

impl MetricVec {
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Counter(_) => MetricKind::Counter,
            Self::Gauge(_) => MetricKind::Gauge,
            Self::Histogram(_) => MetricKind::Histogram,
            Self::Summary(_) => MetricKind::Summary,
        }
    }

    /// Boxed clone for registry registration
    pub(crate) fn boxed(&self) -> Box<dyn Collector> {
        match self {
            Self::Counter(v) => Box::new(v.clone()),
            Self::Gauge(v) => Box::new(v.clone()),
            Self::Histogram(v) => Box::new(v.clone()),
            Self::Summary(v) => Box::new(v.clone()),
        }
    }
}

/// Validate the kind-specific parameters of a declaration and build its
/// collector. Does not register anything.
pub fn build_collector(metric: &Metric) -> Result<MetricVec, MetricError> {
    let labels: Vec<&str> = metric.labels.iter().map(String::as_str).collect();
    // the exporter refuses empty help strings
    let help = if metric.description.is_empty() {
        metric.name.clone()
    } else {
        metric.description.clone()
    };

    let vec = match metric.kind {
        MetricKind::None => {
            return Err(MetricError::UnknownMetricType(MetricKind::None as i32));
        }
        MetricKind::Counter => {
            MetricVec::Counter(CounterVec::new(Opts::new(metric.name.clone(), help), &labels)?)
        }
        MetricKind::Gauge => {
            MetricVec::Gauge(GaugeVec::new(Opts::new(metric.name.clone(), help), &labels)?)
        }
        MetricKind::Histogram => {
            if metric.buckets.is_empty() {
                return Err(MetricError::MissingBucketParameter(metric.name.clone()));
            }
            MetricVec::Histogram(HistogramVec::new(
                HistogramOpts::new(metric.name.clone(), help).buckets(metric.buckets.clone()),
                &labels,
            )?)
        }
        MetricKind::Summary => {
            if metric.objectives.is_empty() {
                return Err(MetricError::MissingObjectivesParameter(metric.name.clone()));
            }
            MetricVec::Summary(SummaryVec::new(
                SummaryOpts::new(metric.name.clone(), help).objectives(metric.objectives.clone()),
                &labels,
            )?)
        }
    };

    Ok(vec)
}
