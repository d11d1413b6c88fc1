//! Application startup and lifecycle management.

use crate::config::InventionConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::{InventionService, TextProvider};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: InventionConfig,
    pub invention: InventionService,
}

/// Routes, static assets and the request-id/trace/metrics middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/invention-date", post(handlers::get_invention_date))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .nest_service("/static", ServeDir::new(&state.config.web.static_dir))
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
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
    /// Build the application with the Gemini provider described by `config`.
    pub async fn build(config: InventionConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
            api_base: config.google.api_base.clone(),
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(gemini_config));

        tracing::info!(
            model = %config.models.text_model,
            configured = text_provider.is_configured(),
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: InventionConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            invention: InventionService::new(text_provider),
        };
        let router = build_router(state);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Invention service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
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
