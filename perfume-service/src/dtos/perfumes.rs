use crate::services::store::id_to_string;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_LIST_LIMIT: u64 = 50;

#[derive(Debug, Deserialize)]
pub struct PerfumeListParams {
    pub limit: Option<u64>,
}

impl PerfumeListParams {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct PerfumeListResponse {
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePerfumeResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: u64,
}

/// Shapes a stored document for the API: the raw `_id` is replaced by a
/// string `id` and timestamps are rendered as RFC 3339.
pub fn perfume_item(mut document: Document) -> Value {
    let id = document.remove("_id");
    let mut value = normalize_dates(Bson::Document(document)).into_relaxed_extjson();

    if let (Some(id), Value::Object(map)) = (id, &mut value) {
        map.insert("id".to_string(), Value::String(id_to_string(id)));
    }
    value
}

fn normalize_dates(value: Bson) -> Bson {
    match value {
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Bson::String(s),
            Err(_) => Bson::DateTime(dt),
        },
        Bson::Document(doc) => Bson::Document(
            doc.into_iter()
                .map(|(key, value)| (key, normalize_dates(value)))
                .collect(),
        ),
        Bson::Array(items) => Bson::Array(items.into_iter().map(normalize_dates).collect()),
        other => other,
    }
}
