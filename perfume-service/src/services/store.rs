use async_trait::async_trait;
use mongodb::bson::{Bson, DateTime, Document};
use service_core::error::AppError;

/// Collection-oriented access to a document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `data` into `collection` and returns the assigned identifier.
    async fn create_document(&self, collection: &str, data: Document) -> Result<String, AppError>;

    /// Returns at most `limit` documents matching `filter`, in natural order.
    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: u64,
    ) -> Result<Vec<Document>, AppError>;

    async fn count_documents(&self, collection: &str, filter: Document) -> Result<u64, AppError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError>;

    fn database_name(&self) -> &str;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Sets `created_at` and `updated_at` to the current time.
pub fn stamp_timestamps(data: &mut Document) {
    let now = DateTime::now();
    data.insert("created_at", now);
    data.insert("updated_at", now);
}

/// String form of a store-assigned identifier.
pub fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
