//! SQLite persistence for game scores.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{NewScore, StoredScore};
pub use repository::ScoreRepository;
