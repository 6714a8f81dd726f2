//! Storage module for the place collection
//!
//! The whole collection lives in one JSON array. Every operation reads it in
//! full and every write replaces it in full; adapters only differ in where the
//! array is kept.

mod json_file_store;
#[cfg(test)]
mod memory_store;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::features::places::models::Place;

pub use json_file_store::JsonFileStore;
#[cfg(test)]
pub use memory_store::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for loading and persisting the full place collection
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// Read every record in stored order.
    ///
    /// A missing backing document is created empty; an unreadable one is
    /// treated as empty.
    async fn load(&self) -> Result<Vec<Place>, StoreError>;

    /// Replace the stored collection with `places`
    async fn save(&self, places: &[Place]) -> Result<(), StoreError>;

    /// Write a snapshot of `places` next to the primary document and return its file name
    async fn backup(&self, places: &[Place], taken_at: NaiveDateTime)
        -> Result<String, StoreError>;
}

/// Identifier for the next record: highest existing id plus one
pub fn next_id(places: &[Place]) -> i64 {
    places.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

pub fn backup_file_name(taken_at: NaiveDateTime) -> String {
    format!("places_backup_{}.json", taken_at.format("%Y%m%d_%H%M%S"))
}
