pub mod config;
pub mod modules;
pub mod services;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use modules::metrics::metrics_routes;
use services::metrics::Monitor;

pub fn create_app(monitor: Arc<Monitor>) -> Router {
    metrics_routes(monitor).layer(TraceLayer::new_for_http())
}
