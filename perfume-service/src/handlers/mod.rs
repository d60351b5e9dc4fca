pub mod health;
pub mod perfumes;

pub use health::{diagnostics, health_check, metrics_endpoint, root};
pub use perfumes::{create_perfume, list_perfumes, seed_perfumes};
