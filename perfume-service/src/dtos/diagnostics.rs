use serde::Serialize;

/// Connectivity report for `GET /test`. The status strings are informational.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsResponse {
    fn default() -> Self {
        Self {
            backend: "Running".to_string(),
            database: "Not Available".to_string(),
            database_url: "Not Set".to_string(),
            database_name: "Not Set".to_string(),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}
