use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::services::metrics::Monitor;

/// Serves the text exposition when the request path matches the monitor's
/// metric path at request time, 404 otherwise. A configured path without a
/// leading `/` is treated as rooted, so `metrics` and `""` serve at
/// `/metrics` and `/`.
pub async fn get_metrics(State(monitor): State<Arc<Monitor>>, uri: Uri) -> Response {
    if uri.path() != rooted(&monitor.metric_path()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match monitor.export() {
        Ok(output) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            output,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to export metrics: {}", e),
        )
            .into_response(),
    }
}

pub(crate) fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
