pub mod perfume;

pub use perfume::{sample_perfumes, Perfume, PERFUME_COLLECTION};
