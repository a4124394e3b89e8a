//! Application startup and lifecycle management.

use crate::config::InsightsConfig;
use crate::handlers;
use crate::services::{
    ChatGateway, CsvDatasetSource, DatasetSource, GhostBeneficiaryDetector, GhostThresholds,
    MigrationPulseRanker,
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: InsightsConfig,
    pub datasets: Arc<dyn DatasetSource>,
    pub ghost_detector: GhostBeneficiaryDetector,
    pub migration_ranker: MigrationPulseRanker,
    pub chat: Arc<ChatGateway>,
}

impl AppState {
    pub fn new(
        config: InsightsConfig,
        datasets: Arc<dyn DatasetSource>,
        chat: Arc<ChatGateway>,
    ) -> Self {
        Self {
            ghost_detector: GhostBeneficiaryDetector::new(GhostThresholds::from(&config.detection)),
            migration_ranker: MigrationPulseRanker::new(config.detection.migration_top_n),
            config,
            datasets,
            chat,
        }
    }

    /// CSV-backed datasets and the placeholder chat gateway.
    pub fn from_config(config: InsightsConfig) -> Self {
        let datasets: Arc<dyn DatasetSource> = Arc::new(CsvDatasetSource::new(
            &config.datasets.enrolment_path,
            &config.datasets.demographic_path,
        ));
        let chat = Arc::new(ChatGateway::placeholder(
            config.chat.placeholder_response.clone(),
        ));
        Self::new(config, datasets, chat)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/api/anomalies/ghost-beneficiary",
            get(handlers::ghost_beneficiaries),
        )
        .route("/api/trends/migration-pulse", get(handlers::migration_pulse))
        .route("/api/chat", post(handlers::chat))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: InsightsConfig) -> Result<Self, AppError> {
        tracing::info!(
            enrolment = %config.datasets.enrolment_path.display(),
            demographic = %config.datasets.demographic_path.display(),
            min_total = config.detection.ghost_min_total,
            child_ratio = config.detection.ghost_child_ratio,
            top_n = config.detection.migration_top_n,
            "Configured dataset sources"
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::from_config(config);

        // port 0 picks a random port for testing
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Insights service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
