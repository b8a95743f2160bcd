use super::collector::MetricVec;
use super::{MetricError, MetricKind};

/// A metric declaration and, once registered, its collector handle.
///
/// `Metric::default()` is the "not found" value handed back by
/// [`Monitor::get_metric`](super::Monitor::get_metric).
#[derive(Debug, Clone, Default)]
pub struct Metric {
    pub name: String,
    pub kind: MetricKind,
    pub description: String,
    pub labels: Vec<String>,
    /// Histogram bucket upper bounds
    pub buckets: Vec<f64>,
    /// Summary objectives: quantile -> absolute error
    pub objectives: Vec<(f64, f64)>,
    pub(crate) vec: Option<MetricVec>,
}

impl Metric {
    pub fn new<S: Into<String>>(name: S, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.labels = labels.into_iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    pub fn buckets(mut self, buckets: Vec<f64>) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn objectives(mut self, objectives: Vec<(f64, f64)>) -> Self {
        self.objectives = objectives;
        self
    }

    pub fn is_registered(&self) -> bool {
        self.vec.is_some()
    }

    /// Collector handle, `None` until the metric is registered
    pub fn collector(&self) -> Option<&MetricVec> {
        self.vec.as_ref()
    }

    /// Increment a counter or gauge by one
    pub fn inc(&self, label_values: &[&str]) -> Result<(), MetricError> {
        match self.registered()? {
            MetricVec::Counter(v) => v.get_metric_with_label_values(label_values)?.inc(),
            MetricVec::Gauge(v) => v.get_metric_with_label_values(label_values)?.inc(),
            _ => return Err(self.unsupported("inc")),
        }
        Ok(())
    }

    /// Add `value` to a counter or gauge. Counters reject negative and NaN values.
    pub fn add(&self, label_values: &[&str], value: f64) -> Result<(), MetricError> {
        match self.registered()? {
            MetricVec::Counter(v) => {
                if value.is_nan() || value < 0.0 {
                    return Err(prometheus::Error::Msg(format!(
                        "counter '{}' cannot decrease by {}",
                        self.name, value
                    ))
                    .into());
                }
                v.get_metric_with_label_values(label_values)?.inc_by(value)
            }
            MetricVec::Gauge(v) => v.get_metric_with_label_values(label_values)?.add(value),
            _ => return Err(self.unsupported("add")),
        }
        Ok(())
    }

    pub fn set_gauge_value(&self, label_values: &[&str], value: f64) -> Result<(), MetricError> {
        match self.registered()? {
            MetricVec::Gauge(v) => v.get_metric_with_label_values(label_values)?.set(value),
            _ => return Err(self.unsupported("set gauge value")),
        }
        Ok(())
    }

    /// Record one observation on a histogram or summary
    pub fn observe(&self, label_values: &[&str], value: f64) -> Result<(), MetricError> {
        match self.registered()? {
            MetricVec::Histogram(v) => v.get_metric_with_label_values(label_values)?.observe(value),
            MetricVec::Summary(v) => v.get_metric_with_label_values(label_values)?.observe(value),
            _ => return Err(self.unsupported("observe")),
        }
        Ok(())
    }

    fn registered(&self) -> Result<&MetricVec, MetricError> {
        self.vec.as_ref().ok_or(MetricError::MetricNotFound)
    }

    fn unsupported(&self, op: &'static str) -> MetricError {
        MetricError::UnsupportedOperation {
            name: self.name.clone(),
            kind: self.kind,
            op,
        }
    }
}
