use std::env;

use crate::services::metrics::Monitor;

/// Environment configuration
/// Every monitor setting is optional; unset values keep the monitor defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub metric_path: Option<String>,
    pub slow_time: Option<i32>,
    pub exclude_paths: Option<Vec<String>>,
    pub duration: Option<Vec<f64>>,
    pub metric_prefix: Option<String>,
    pub metric_suffix: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let metric_path = match lookup("METRIC_PATH") {
            Some(path) if !path.starts_with('/') => {
                return Err("METRIC_PATH must start with '/'".to_string());
            }
            other => other,
        };

        let slow_time = lookup("METRIC_SLOW_TIME")
            .map(|v| {
                v.trim()
                    .parse::<i32>()
                    .map_err(|_| format!("METRIC_SLOW_TIME must be an integer, got '{}'", v))
            })
            .transpose()?;

        let exclude_paths = lookup("METRIC_EXCLUDE_PATHS").map(|v| split_list(&v));

        let duration = lookup("METRIC_DURATION_BUCKETS")
            .map(|v| {
                split_list(&v)
                    .iter()
                    .map(|b| {
                        b.parse::<f64>().map_err(|_| {
                            format!("METRIC_DURATION_BUCKETS has invalid bucket '{}'", b)
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            bind_addr,
            metric_path,
            slow_time,
            exclude_paths,
            duration,
            metric_prefix: lookup("METRIC_PREFIX"),
            metric_suffix: lookup("METRIC_SUFFIX"),
        })
    }

    /// Push the configured values into a monitor
    pub fn apply(&self, monitor: &Monitor) {
        if let Some(path) = &self.metric_path {
            monitor.set_metric_path(path.clone());
        }
        if let Some(slow_time) = self.slow_time {
            monitor.set_slow_time(slow_time);
        }
        if let Some(paths) = &self.exclude_paths {
            monitor.set_exclude_paths(paths.clone());
        }
        if let Some(duration) = &self.duration {
            monitor.set_duration(duration.clone());
        }
        if let Some(prefix) = &self.metric_prefix {
            monitor.set_metric_prefix(prefix);
        }
        if let Some(suffix) = &self.metric_suffix {
            monitor.set_metric_suffix(suffix);
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
