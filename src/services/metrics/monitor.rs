use lazy_static::lazy_static;
use prometheus::{Encoder, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use super::collector::build_collector;
use super::names::{BuiltinMetric, MetricNaming};
use super::{Metric, MetricError, MetricKind};

pub const DEFAULT_METRIC_PATH: &str = "/debug/metrics";
pub const DEFAULT_SLOW_TIME: i32 = 5;
pub const DEFAULT_DURATION: [f64; 5] = [0.1, 0.3, 1.2, 5.0, 10.0];

lazy_static! {
    static ref MONITOR: Arc<Monitor> =
        Arc::new(Monitor::with_registry(prometheus::default_registry().clone()));
}

/// Process-wide monitor backed by the default prometheus registry.
/// Created on first call; every call returns the same instance.
pub fn get_monitor() -> Arc<Monitor> {
    MONITOR.clone()
}

#[derive(Debug, Clone)]
struct Settings {
    metric_path: String,
    slow_time: i32,
    exclude_paths: Vec<String>,
    duration: Vec<f64>,
    naming: MetricNaming,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metric_path: DEFAULT_METRIC_PATH.to_string(),
            slow_time: DEFAULT_SLOW_TIME,
            exclude_paths: Vec::new(),
            duration: DEFAULT_DURATION.to_vec(),
            naming: MetricNaming::default(),
        }
    }
}

/// Registry of declared metrics plus the settings the request middleware
/// reads (export path, excluded paths, slow threshold, duration buckets).
pub struct Monitor {
    settings: RwLock<Settings>,
    metrics: RwLock<HashMap<String, Arc<Metric>>>,
    metadata: RwLock<HashMap<String, String>>,
    registry: Registry,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    /// Independent monitor with its own exporter registry
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
            metrics: RwLock::new(HashMap::new()),
            metadata: RwLock::new(HashMap::new()),
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metric_path(&self) -> String {
        read(&self.settings).metric_path.clone()
    }

    pub fn set_metric_path<S: Into<String>>(&self, path: S) {
        write(&self.settings).metric_path = path.into();
    }

    pub fn exclude_paths(&self) -> Vec<String> {
        read(&self.settings).exclude_paths.clone()
    }

    /// Paths the middleware should not report, e.g. /ping or /healthz
    pub fn set_exclude_paths(&self, paths: Vec<String>) {
        write(&self.settings).exclude_paths = paths;
    }

    pub fn is_excluded_path(&self, path: &str) -> bool {
        read(&self.settings).exclude_paths.iter().any(|p| p == path)
    }

    pub fn slow_time(&self) -> i32 {
        read(&self.settings).slow_time
    }

    /// Threshold in seconds above which a request counts as slow
    pub fn set_slow_time(&self, slow_time: i32) {
        write(&self.settings).slow_time = slow_time;
    }

    pub fn is_slow_request(&self, elapsed: Duration) -> bool {
        elapsed.as_secs() as i64 > i64::from(self.slow_time())
    }

    pub fn duration(&self) -> Vec<f64> {
        read(&self.settings).duration.clone()
    }

    /// Buckets for the request duration histogram. Not checked for order.
    pub fn set_duration(&self, duration: Vec<f64>) {
        write(&self.settings).duration = duration;
    }

    pub fn set_metric_prefix(&self, prefix: &str) {
        write(&self.settings).naming.push_prefix(prefix);
    }

    pub fn set_metric_suffix(&self, suffix: &str) {
        write(&self.settings).naming.push_suffix(suffix);
    }

    /// Resolved name of a built-in metric under the current prefix/suffix
    pub fn metric_name(&self, metric: BuiltinMetric) -> String {
        read(&self.settings).naming.name_of(metric)
    }

    pub fn set_metadata<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        write(&self.metadata).insert(key.into(), value.into());
    }

    pub fn metadata(&self, key: &str) -> Option<String> {
        read(&self.metadata).get(key).cloned()
    }

    pub fn find_metric(&self, name: &str) -> Option<Arc<Metric>> {
        read(&self.metrics).get(name).cloned()
    }

    /// Lookup that never fails: an unknown name yields `Metric::default()`,
    /// so callers must check `kind`/`is_registered()` before use.
    pub fn get_metric(&self, name: &str) -> Arc<Metric> {
        self.find_metric(name)
            .unwrap_or_else(|| Arc::new(Metric::default()))
    }

    pub fn metric_count(&self) -> usize {
        read(&self.metrics).len()
    }

    /// Validate a declaration, build its collector, register it with the
    /// exporter and keep it under its name. Nothing is retained on error.
    pub fn add_metric(&self, mut metric: Metric) -> Result<(), MetricError> {
        let mut metrics = write(&self.metrics);

        if metrics.contains_key(&metric.name) {
            return Err(MetricError::DuplicateMetricName(metric.name));
        }
        if metric.name.is_empty() {
            return Err(MetricError::EmptyMetricName);
        }

        let vec = build_collector(&metric)?;
        self.registry
            .register(vec.boxed())
            .map_err(|source| MetricError::ExporterRegistrationFailed {
                name: metric.name.clone(),
                source,
            })?;

        tracing::debug!(name = %metric.name, kind = %metric.kind, "registered metric");
        metric.vec = Some(vec);
        metrics.insert(metric.name.clone(), Arc::new(metric));
        Ok(())
    }

    /// Declare the metrics the request middleware records, under the
    /// current prefix/suffix and duration buckets.
    pub fn register_builtin_metrics(&self) -> Result<(), MetricError> {
        let (naming, duration, slow_time) = {
            let settings = read(&self.settings);
            (
                settings.naming.clone(),
                settings.duration.clone(),
                settings.slow_time,
            )
        };
        let route_labels = ["uri", "method", "code"];

        let declarations = BuiltinMetric::ALL.into_iter().map(|builtin| {
            let metric = Metric::new(naming.name_of(builtin), MetricKind::Counter);
            match builtin {
                BuiltinMetric::RequestTotal => {
                    metric.description("all the server received request num.")
                }
                BuiltinMetric::RequestUvTotal => {
                    metric.description("all the server received ip num.")
                }
                BuiltinMetric::UriRequestTotal => metric
                    .description("all the server received request num with every uri.")
                    .labels(route_labels),
                BuiltinMetric::RequestBody => {
                    metric.description("the server received request body size, unit byte")
                }
                BuiltinMetric::ResponseBody => {
                    metric.description("the server send response body size, unit byte")
                }
                BuiltinMetric::RequestDuration => Metric {
                    kind: MetricKind::Histogram,
                    ..metric
                }
                .description("the time server took to handle the request.")
                .labels(["uri"])
                .buckets(duration.clone()),
                BuiltinMetric::SlowRequest => metric
                    .description(format!(
                        "the server handled slow requests counter, t={}.",
                        slow_time
                    ))
                    .labels(route_labels),
            }
        });

        for metric in declarations {
            self.add_metric(metric)?;
        }
        tracing::info!(count = BuiltinMetric::ALL.len(), "registered built-in metrics");
        Ok(())
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, MetricError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| MetricError::Encode(e.to_string()))
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
