use crate::dtos::DiagnosticsResponse;
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

const MAX_REPORTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Perfume Store API is running" }))
}

/// Liveness check: pings the store when one is configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let result = match &state.store {
        Some(store) => store.health_check().await,
        None => Ok(()),
    };

    match result {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "perfume-service",
                "version": env!("CARGO_PKG_VERSION"),
                "database": state.store.is_some(),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "perfume-service",
                "error": e.to_string()
            })),
        ),
    }
}

/// Best-effort connectivity report. Always answers 200.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut report = DiagnosticsResponse::default();

    if let Some(store) = &state.store {
        report.database = "Available".to_string();
        report.connection_status = "Connected".to_string();

        match store.list_collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_REPORTED_COLLECTIONS);
                report.collections = names;
                report.database = format!("Connected & Working ({})", store.database_name());
            }
            Err(e) => {
                tracing::warn!("Diagnostics could not list collections: {}", e);
                let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
                report.database = format!("Connected but Error: {}", message);
            }
        }
    }

    report.database_url = set_or_not(state.config.database.url.is_some());
    report.database_name = set_or_not(state.config.database.name.is_some());

    Json(report)
}

fn set_or_not(present: bool) -> String {
    let status = if present { "Set" } else { "Not Set" };
    status.to_string()
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
