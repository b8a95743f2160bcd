use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller::get_metrics;
use crate::services::metrics::Monitor;

/// The metric path is matched per request rather than registered as a
/// route, so any configured string is accepted and later
/// `set_metric_path` calls apply to an existing router.
pub fn metrics_routes(monitor: Arc<Monitor>) -> Router {
    Router::new()
        .fallback(get(get_metrics))
        .with_state(monitor)
}
