//! SQLite adapter for intake persistence.

mod models;
mod repository;

pub use repository::SqliteIntakeRepository;
