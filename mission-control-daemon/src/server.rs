//! HTTP server exposing the discovery endpoint.
//!
//! # Routes
//!
//! - `GET /api/microservices` - presentable services as a JSON array
//! - `GET /health` - container runtime reachability
//!
//! Every request performs its own runtime listing. Nothing is cached
//! between requests and failures are never retried.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use mission_control_core::HealthStatus;
use mission_control_core::config::{MissionControlConfig, ServerConfig};
use mission_control_discovery::{BollardDockerClient, DiscoveryService, DockerClient, FilterConfig};

/// Body returned when the runtime listing fails.
///
/// The underlying cause is logged, never sent to the client.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch microservices";

/// Shared, read-only state for request handlers.
pub struct AppState<D: DockerClient> {
    discovery: DiscoveryService<D>,
}

impl<D: DockerClient> AppState<D> {
    /// Wrap a discovery service for the request handlers.
    pub fn new(discovery: DiscoveryService<D>) -> Self {
        Self { discovery }
    }
}

/// Build the production state from configuration.
///
/// The Docker client connects lazily, so a missing or unreachable socket
/// does not stop startup. It is logged here and every later request
/// answers with the opaque 500 until the runtime comes up.
///
/// # Errors
///
/// Returns an error only if the discovery configuration is invalid.
pub async fn build_state(
    config: &MissionControlConfig,
) -> Result<Arc<AppState<BollardDockerClient>>> {
    let filter_config = FilterConfig::from_core(config);
    let client = Arc::new(BollardDockerClient::new(&filter_config.docker_socket));
    let discovery = DiscoveryService::new(client, &filter_config)
        .map_err(|e| anyhow::anyhow!("failed to build discovery service: {}", e))?;

    if let HealthStatus::Unhealthy(reason) = discovery.health_check().await {
        warn!(reason = %reason, "container runtime not reachable at startup");
    }

    Ok(Arc::new(AppState::new(discovery)))
}

/// Build the application router.
pub fn router<D: DockerClient>(state: Arc<AppState<D>>) -> Router {
    Router::new()
        .route("/api/microservices", get(list_microservices::<D>))
        .route("/health", get(health::<D>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `listen_addr:port` and serve until ctrl-c.
///
/// # Errors
///
/// Returns an error if the address is invalid, binding fails, or the
/// server terminates abnormally.
pub async fn serve<D: DockerClient>(config: &ServerConfig, state: Arc<AppState<D>>) -> Result<()> {
    let ip: IpAddr = config
        .listen_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server listen address: {}", e))?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;
    info!(listen_addr = %addr, "HTTP server listening");

    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<D, F>(listener: TcpListener, state: Arc<AppState<D>>, shutdown: F) -> Result<()>
where
    D: DockerClient,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn list_microservices<D: DockerClient>(State(state): State<Arc<AppState<D>>>) -> Response {
    match state.discovery.discover().await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => {
            error!(error = %e, "failed to fetch microservices");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": FETCH_FAILED_MESSAGE })),
            )
                .into_response()
        }
    }
}

async fn health<D: DockerClient>(State(state): State<Arc<AppState<D>>>) -> Response {
    let status = state.discovery.health_check().await;
    let code = if status.is_unhealthy() {
        warn!(status = ?status, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (code, Json(status)).into_response()
}
