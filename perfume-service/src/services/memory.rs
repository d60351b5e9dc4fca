//! Process-local document store.
//!
//! Keeps collections in insertion order and assigns `ObjectId`s the way the
//! server does. Filters support top-level equality only.

use crate::services::store::{id_to_string, stamp_timestamps, DocumentStore};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use service_core::error::AppError;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

pub struct InMemoryStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        mut data: Document,
    ) -> Result<String, AppError> {
        stamp_timestamps(&mut data);
        if !data.contains_key("_id") {
            data.insert("_id", ObjectId::new());
        }
        let id = data.get("_id").cloned().map(id_to_string).unwrap_or_default();

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(data);

        tracing::debug!(collection = %collection, id = %id, "Stored document in memory");
        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: u64,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| matches(doc, &filter)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.collections.read().await.keys().cloned().collect())
    }

    fn database_name(&self) -> &str {
        &self.name
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
