#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::Document;
use perfume_service::config::{DatabaseConfig, ObservabilityConfig, PerfumeConfig};
use perfume_service::services::{init_metrics, DocumentStore, InMemoryStore};
use perfume_service::startup::{router, AppState, Application};
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::{Arc, Once};
use tower::ServiceExt;

pub const TEST_DATABASE: &str = "perfume_test";

// The Prometheus recorder is process-global; install it once for all tests
static INIT_METRICS: Once = Once::new();

pub fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics().expect("Failed to install metrics recorder");
    });
}

pub struct TestApp {
    pub router: Router,
    pub store: Option<Arc<dyn DocumentStore>>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

pub fn test_config(with_database: bool) -> PerfumeConfig {
    let database = if with_database {
        DatabaseConfig {
            url: Some("mongodb://localhost:27017".to_string()),
            name: Some(TEST_DATABASE.to_string()),
        }
    } else {
        DatabaseConfig::default()
    };

    PerfumeConfig {
        common: CoreConfig { port: 0 },
        database,
        observability: ObservabilityConfig::default(),
    }
}

impl TestApp {
    /// App backed by a fresh in-memory store.
    pub fn spawn() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new(TEST_DATABASE)))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let state = AppState {
            config: test_config(true),
            store: Some(store.clone()),
        };
        Self {
            router: router(state),
            store: Some(store),
        }
    }

    /// App started without DATABASE_URL / DATABASE_NAME.
    pub fn without_store() -> Self {
        let state = AppState {
            config: test_config(false),
            store: None,
        };
        Self {
            router: router(state),
            store: None,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// POSTs `body` verbatim with the given content type.
    pub async fn send_raw(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.execute(request).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<serde_json::Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");
        self.execute(request).await
    }

    async fn execute(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
        };

        TestResponse { status, body }
    }

    pub async fn stored_count(&self, collection: &str) -> u64 {
        self.store
            .as_ref()
            .expect("TestApp has no store")
            .count_documents(collection, Document::new())
            .await
            .expect("Failed to count documents")
    }
}

/// Application bound to an ephemeral port and served over TCP.
pub struct ServedApp {
    pub address: String,
    pub port: u16,
}

impl ServedApp {
    /// Serves the full application, middleware included, over an in-memory store.
    pub async fn spawn() -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new(TEST_DATABASE));
        let app = Application::build_with_store(test_config(true), Some(store))
            .await
            .expect("Failed to build application");
        Self::run(app)
    }

    /// Goes through the production startup path, store connection included.
    pub async fn from_config(config: PerfumeConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        Self::run(app)
    }

    fn run(app: Application) -> Self {
        let port = app.port();
        tokio::spawn(app.run_until_stopped());
        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Store whose every operation fails as if the server were unreachable.
pub struct UnreachableStore;

fn unreachable() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(
        "Server selection timeout: No available servers"
    ))
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn create_document(&self, _collection: &str, _data: Document) -> Result<String, AppError> {
        Err(unreachable())
    }

    async fn get_documents(
        &self,
        _collection: &str,
        _filter: Document,
        _limit: u64,
    ) -> Result<Vec<Document>, AppError> {
        Err(unreachable())
    }

    async fn count_documents(&self, _collection: &str, _filter: Document) -> Result<u64, AppError> {
        Err(unreachable())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        Err(unreachable())
    }

    fn database_name(&self) -> &str {
        TEST_DATABASE
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(unreachable())
    }
}
