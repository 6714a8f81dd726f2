use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::features::places::models::Place;
use crate::modules::storage::{backup_file_name, PlaceStore, StoreError};

/// In-process place store; backups are kept alongside the collection
#[derive(Default)]
pub struct MemoryStore {
    places: RwLock<Vec<Place>>,
    backups: RwLock<Vec<(String, Vec<Place>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(places: Vec<Place>) -> Self {
        Self {
            places: RwLock::new(places),
            backups: RwLock::default(),
        }
    }

    /// Snapshots written so far, oldest first
    pub async fn backups(&self) -> Vec<(String, Vec<Place>)> {
        self.backups.read().await.clone()
    }
}

#[async_trait]
impl PlaceStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Place>, StoreError> {
        Ok(self.places.read().await.clone())
    }

    async fn save(&self, places: &[Place]) -> Result<(), StoreError> {
        *self.places.write().await = places.to_vec();
        Ok(())
    }

    async fn backup(
        &self,
        places: &[Place],
        taken_at: NaiveDateTime,
    ) -> Result<String, StoreError> {
        let file_name = backup_file_name(taken_at);
        self.backups
            .write()
            .await
            .push((file_name.clone(), places.to_vec()));
        Ok(file_name)
    }
}
