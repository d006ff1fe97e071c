use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, estimate::AppState},
    metrics,
    signals::setup_signal_handlers,
};

/// Requests are tiny JSON documents; anything bigger is noise.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Start the house pricer server
///
/// This function:
/// 1. Initializes metrics
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics());

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // Setup signal handlers (SIGTERM, SIGINT for shutdown; SIGHUP for reload)
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState {
        config: config_swap.clone(),
    };

    let app = create_router(&config, app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting house pricer on {}", addr);
    info!(
        currency = %config.pricing.currency,
        current_year = config.pricing.current_year,
        "Pricing configuration active"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    config: &Config,
    app_state: AppState,
    metrics_handle: Arc<PrometheusHandle>,
) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/v1/house-price",
            post(handlers::estimate::handle_estimate),
        )
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    if config.metrics.enabled {
        router = router.route(
            &config.metrics.endpoint,
            get(handlers::metrics_handler::metrics).with_state(metrics_handle),
        );
    }

    router
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_metrics_handle() -> Arc<PrometheusHandle> {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        Arc::new(recorder.handle())
    }

    #[tokio::test]
    async fn test_create_router() {
        let config = Config::default();
        let app_state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config.clone())),
        };

        let _app = create_router(&config, app_state, test_metrics_handle());
        // Router created successfully - no panic
    }

    #[tokio::test]
    async fn test_create_router_without_metrics() {
        let mut config = Config::default();
        config.metrics.enabled = false;
        let app_state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config.clone())),
        };

        let _app = create_router(&config, app_state, test_metrics_handle());
    }
}
