pub mod diagnostics;
pub mod perfumes;

pub use diagnostics::DiagnosticsResponse;
pub use perfumes::{
    perfume_item, CreatePerfumeResponse, PerfumeListParams, PerfumeListResponse, SeedResponse,
};
