//! SQLite adapters for work order persistence.

mod models;
mod repository;

pub use repository::SqliteWorkOrderRepository;
