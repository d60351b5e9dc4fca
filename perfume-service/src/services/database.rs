use crate::services::store::{id_to_string, stamp_timestamps, DocumentStore};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Builds a client for `uri`. The driver connects lazily, so an
    /// unreachable server surfaces on the first operation, not here.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("perfume-service".to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDb {
    async fn create_document(
        &self,
        collection: &str,
        mut data: Document,
    ) -> Result<String, AppError> {
        stamp_timestamps(&mut data);
        let result = self
            .collection(collection)
            .insert_one(data, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Insert failed: {}", e);
                AppError::from(e)
            })?;
        Ok(id_to_string(result.inserted_id))
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: u64,
    ) -> Result<Vec<Document>, AppError> {
        // The server reads a zero limit as "no limit"
        if limit == 0 {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let cursor = self
            .collection(collection)
            .find(filter, options)
            .await
            .map_err(AppError::from)?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(documents)
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        self.collection(collection)
            .count_documents(filter, None)
            .await
            .map_err(AppError::from)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.db
            .list_collection_names(None)
            .await
            .map_err(AppError::from)
    }

    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
