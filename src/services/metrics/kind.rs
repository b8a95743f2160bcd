use std::fmt;

use super::MetricError;

/// Statistical shape of a metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MetricKind {
    /// Unset sentinel, never registrable
    #[default]
    None = 0,
    Counter = 1,
    Gauge = 2,
    Histogram = 3,
    Summary = 4,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Counter => "counter",
            Self::Gauge => "gauge",
            Self::Histogram => "histogram",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for MetricKind {
    type Error = MetricError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Counter),
            2 => Ok(Self::Gauge),
            3 => Ok(Self::Histogram),
            4 => Ok(Self::Summary),
            other => Err(MetricError::UnknownMetricType(other)),
        }
    }
}
