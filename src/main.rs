use http_monitor::config::Config;
use http_monitor::services::metrics::get_monitor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_monitor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let monitor = get_monitor();
    config.apply(&monitor);
    monitor
        .register_builtin_metrics()
        .expect("Failed to register built-in metrics");

    let metric_path = monitor.metric_path();
    let app = http_monitor::create_app(monitor);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Serving metrics on http://{}{}", config.bind_addr, metric_path);
    axum::serve(listener, app).await.expect("Server error");
}
