//! perfume-service: REST catalog of perfumes over a document store.
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
