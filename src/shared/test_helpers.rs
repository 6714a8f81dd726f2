use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::features::places::dtos::{CoordinateInput, PlaceInputDto};
use crate::features::places::models::Place;
use crate::features::places::validation::ValidationMode;
use crate::features::places::PlaceService;
use crate::modules::storage::{JsonFileStore, MemoryStore, PlaceStore, StoreError};

pub fn fixed_time() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-05-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn sample_place(id: i64) -> Place {
    Place {
        id,
        name: format!("Place {}", id),
        place_type: "Restaurant".to_string(),
        quartier: "Tevragh Zeina".to_string(),
        commune: None,
        lat: 18.0735,
        lng: -15.9582,
        created_at: Some(fixed_time()),
        updated_at: None,
        last_modified: None,
        google_place_id: None,
        rating: None,
        address: None,
        extra: Default::default(),
    }
}

/// Create input for the harbor used throughout the scenarios
pub fn port_input() -> PlaceInputDto {
    PlaceInputDto {
        name: Some("Port".to_string()),
        place_type: Some("Harbor".to_string()),
        quartier: Some("Centre".to_string()),
        lat: Some(CoordinateInput::Number(18.08)),
        lng: Some(CoordinateInput::Number(-15.97)),
        ..Default::default()
    }
}

pub fn place_service(mode: ValidationMode) -> (Arc<PlaceService>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(PlaceService::new(store.clone(), mode));
    (service, store)
}

/// Store whose disk is gone: reads succeed, every write fails
pub struct ReadOnlyStore(pub Vec<Place>);

#[async_trait]
impl PlaceStore for ReadOnlyStore {
    async fn load(&self) -> Result<Vec<Place>, StoreError> {
        Ok(self.0.clone())
    }

    async fn save(&self, _places: &[Place]) -> Result<(), StoreError> {
        Err(read_only_error())
    }

    async fn backup(
        &self,
        _places: &[Place],
        _taken_at: NaiveDateTime,
    ) -> Result<String, StoreError> {
        Err(read_only_error())
    }
}

fn read_only_error() -> StoreError {
    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only file system").into()
}

/// Scratch directory under the system temp dir, removed on drop
pub struct TempDir(pub PathBuf);

impl TempDir {
    pub fn create() -> Self {
        Self(std::env::temp_dir().join(format!("placemap-{}", Uuid::new_v4())))
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&StorageConfig {
            data_file: self.0.join("data").join("places.json"),
            backup_dir: self.0.join("backups"),
        })
    }

    /// Seed the data file with raw content
    pub fn write_data(&self, content: &str) -> JsonFileStore {
        let store = self.store();
        std::fs::create_dir_all(self.0.join("data")).unwrap();
        std::fs::write(store.data_file(), content).unwrap();
        store
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
