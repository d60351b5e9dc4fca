//! Application startup and lifecycle management.

use crate::config::PerfumeConfig;
use crate::handlers;
use crate::services::{DocumentStore, MongoDb};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PerfumeConfig,
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    /// The configured store, or a server error when the service runs without one.
    pub fn store(&self) -> Result<&Arc<dyn DocumentStore>, AppError> {
        self.store
            .as_ref()
            .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("Database not configured")))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/test", get(handlers::diagnostics))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/seed", post(handlers::seed_perfumes))
        .route(
            "/api/perfumes",
            get(handlers::list_perfumes).post(handlers::create_perfume),
        )
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Opens the MongoDB store when both the URL and database name are set.
///
/// A connection string that cannot be parsed or resolved leaves the service
/// running without a store, so `/test` can still report on it.
pub async fn connect_store(config: &PerfumeConfig) -> Option<Arc<dyn DocumentStore>> {
    let Some((url, name)) = config.database.connection() else {
        tracing::warn!("DATABASE_URL or DATABASE_NAME not set; running without a database");
        return None;
    };

    match MongoDb::connect(url, name).await {
        Ok(db) => Some(Arc::new(db)),
        Err(e) => {
            tracing::error!(
                "Failed to initialize document store, running without a database: {}",
                e
            );
            None
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: PerfumeConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await;
        Self::build_with_store(config, store).await
    }

    pub async fn build_with_store(
        config: PerfumeConfig,
        store: Option<Arc<dyn DocumentStore>>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState { config, store };
        let app = router(state);

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
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
