//! SQLite adapters for catalog persistence.

mod models;
mod repository;

pub use repository::SqliteCatalogRepository;
