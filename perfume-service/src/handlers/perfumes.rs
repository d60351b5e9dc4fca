use crate::dtos::{
    perfume_item, CreatePerfumeResponse, PerfumeListParams, PerfumeListResponse, SeedResponse,
};
use crate::models::{sample_perfumes, Perfume, PERFUME_COLLECTION};
use crate::services::record_perfumes_created;
use crate::startup::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use mongodb::bson::doc;
use service_core::error::AppError;
use validator::Validate;

#[tracing::instrument(skip(state, query))]
pub async fn list_perfumes(
    State(state): State<AppState>,
    query: Result<Query<PerfumeListParams>, QueryRejection>,
) -> Result<Json<PerfumeListResponse>, AppError> {
    let Query(params) = query?;
    let store = state.store()?;
    let limit = params.limit();

    let documents = store
        .get_documents(PERFUME_COLLECTION, doc! {}, limit)
        .await?;

    tracing::debug!(count = documents.len(), limit, "Listed perfumes");

    Ok(Json(PerfumeListResponse {
        items: documents.into_iter().map(perfume_item).collect(),
    }))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_perfume(
    State(state): State<AppState>,
    payload: Result<Json<Perfume>, JsonRejection>,
) -> Result<Json<CreatePerfumeResponse>, AppError> {
    let Json(perfume) = payload?;
    perfume.validate()?;

    let store = state.store()?;
    let id = store
        .create_document(PERFUME_COLLECTION, perfume.to_document()?)
        .await?;

    record_perfumes_created(1);
    tracing::info!(id = %id, name = %perfume.name, "Perfume created");

    Ok(Json(CreatePerfumeResponse { id }))
}

/// Writes the sample catalog when the collection is empty.
#[tracing::instrument(skip(state))]
pub async fn seed_perfumes(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let store = state.store()?;

    let count = store.count_documents(PERFUME_COLLECTION, doc! {}).await?;
    if count > 0 {
        return Ok(Json(SeedResponse {
            message: "Perfumes already seeded".to_string(),
            count,
        }));
    }

    let samples = sample_perfumes();
    let seeded = samples.len() as u64;
    for perfume in samples {
        store
            .create_document(PERFUME_COLLECTION, perfume.to_document()?)
            .await?;
    }
    record_perfumes_created(seeded);

    let count = store.count_documents(PERFUME_COLLECTION, doc! {}).await?;
    tracing::info!(count, "Seeded perfumes");

    Ok(Json(SeedResponse {
        message: "Seeded perfumes".to_string(),
        count,
    }))
}
