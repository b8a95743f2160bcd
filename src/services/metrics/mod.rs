pub mod collector;
pub mod error;
pub mod kind;
pub mod metric;
pub mod monitor;
pub mod names;
pub mod summary;

pub use collector::{build_collector, MetricVec};
pub use error::MetricError;
pub use kind::MetricKind;
pub use metric::Metric;
pub use monitor::{get_monitor, Monitor};
pub use names::{BuiltinMetric, MetricNaming};
pub use summary::{Summary, SummaryOpts, SummaryVec};
