use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct PerfumeConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

/// Connection settings for the document store. Both values must be present
/// for the service to open a connection.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl DatabaseConfig {
    /// URL and database name, when both are set.
    pub fn connection(&self) -> Option<(&str, &str)> {
        match (&self.url, &self.name) {
            (Some(url), Some(name)) => Some((url.as_str(), name.as_str())),
            _ => None,
        }
    }
}

impl PerfumeConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, PORT and the APP__ prefix)
        let common_config = core_config::Config::load()?;

        Ok(PerfumeConfig {
            common: common_config,
            database: DatabaseConfig {
                url: optional_env("DATABASE_URL"),
                name: optional_env("DATABASE_NAME"),
            },
            observability: ObservabilityConfig {
                log_level: optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}
