//! File-backed place store
//!
//! Writes go to a hidden sibling file which is then renamed over the target,
//! so readers never observe a half-written document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::features::places::models::Place;
use crate::modules::storage::{backup_file_name, PlaceStore, StoreError};

pub struct JsonFileStore {
    data_file: PathBuf,
    backup_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            data_file: config.data_file.clone(),
            backup_dir: config.backup_dir.clone(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    async fn write_document(path: &Path, places: &[Place]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(places)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "places.json".to_string());
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

        fs::write(&tmp_path, &bytes).await?;
        fs::rename(&tmp_path, path).await?;

        debug!(
            "Wrote {} places ({} bytes) to {}",
            places.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl PlaceStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Place>, StoreError> {
        let bytes = match fs::read(&self.data_file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Data file {} not found, creating an empty one",
                    self.data_file.display()
                );
                Self::write_document(&self.data_file, &[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Data file {} is not a JSON array ({}), treating it as empty",
                    self.data_file.display(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        // Records are decoded one by one so a single odd entry cannot hide the rest
        let mut places = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Place>(record) {
                Ok(place) => places.push(place),
                Err(e) => warn!(
                    "Skipping entry {} of {}: not a place record ({})",
                    index,
                    self.data_file.display(),
                    e
                ),
            }
        }

        Ok(places)
    }

    async fn save(&self, places: &[Place]) -> Result<(), StoreError> {
        Self::write_document(&self.data_file, places).await
    }

    async fn backup(
        &self,
        places: &[Place],
        taken_at: NaiveDateTime,
    ) -> Result<String, StoreError> {
        let file_name = backup_file_name(taken_at);
        let path = self.backup_dir.join(&file_name);

        Self::write_document(&path, places).await?;
        info!("Backup of {} places written to {}", places.len(), path.display());

        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_place, TempDir};

    #[tokio::test]
    async fn test_load_creates_missing_file() {
        let dir = TempDir::create();
        let store = dir.store();

        let places = store.load().await.unwrap();

        assert!(places.is_empty());
        let content = std::fs::read_to_string(store.data_file()).unwrap();
        assert_eq!(content, "[]");
    }

    #[tokio::test]
    async fn test_load_masks_unparsable_file() {
        let dir = TempDir::create();
        let store = dir.store();
        std::fs::create_dir_all(store.data_file().parent().unwrap()).unwrap();
        std::fs::write(store.data_file(), "{ not json").unwrap();

        let places = store.load().await.unwrap();

        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = TempDir::create();
        let store = dir.store();
        let mut third = sample_place(3);
        third.name = "Mosquée Saudique".to_string();
        third.rating = Some(4.5);
        let places = vec![sample_place(7), sample_place(1), third];

        store.save(&places).await.unwrap();
        let first_write = std::fs::read(store.data_file()).unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, places);

        store.save(&loaded).await.unwrap();
        let second_write = std::fs::read(store.data_file()).unwrap();
        assert_eq!(first_write, second_write);

        // Non-ASCII text is written as-is
        let text = String::from_utf8(second_write).unwrap();
        assert!(text.contains("Mosquée Saudique"));
    }

    #[tokio::test]
    async fn test_hand_edited_records_survive_load_and_save() {
        let dir = TempDir::create();
        let store = dir.store();
        let raw = serde_json::json!([
            {
                "id": 1,
                "name": "Clinique Chiva",
                "type": "Hospital",
                "quartier": "Ksar",
                "lat": 18.1,
                "lng": -15.96,
                "google_place_id": "",
                "rating": null,
                "address": "",
                "phone": "+222 45 25 00 00"
            }
        ]);
        std::fs::create_dir_all(store.data_file().parent().unwrap()).unwrap();
        std::fs::write(store.data_file(), serde_json::to_vec_pretty(&raw).unwrap()).unwrap();

        let places = store.load().await.unwrap();
        store.save(&places).await.unwrap();

        let written: Value =
            serde_json::from_slice(&std::fs::read(store.data_file()).unwrap()).unwrap();
        assert_eq!(written, raw);
    }

    #[tokio::test]
    async fn test_load_keeps_valid_records_next_to_odd_ones() {
        let dir = TempDir::create();
        let store = dir.store();
        let raw = r#"[
            {"id": 1, "name": "A", "type": "Cafe", "quartier": "Ksar", "lat": 18.1, "lng": -15.9},
            {"id": 2, "name": "B", "type": "Cafe", "quartier": null, "lat": 18.2, "lng": -15.8},
            "stray"
        ]"#;
        std::fs::create_dir_all(store.data_file().parent().unwrap()).unwrap();
        std::fs::write(store.data_file(), raw).unwrap();

        let places = store.load().await.unwrap();

        assert_eq!(places.len(), 2);
        assert_eq!(places[1].id, 2);
        assert_eq!(places[1].quartier, "");
    }

    #[tokio::test]
    async fn test_backup_leaves_primary_untouched() {
        let dir = TempDir::create();
        let store = dir.store();
        let places = vec![sample_place(1), sample_place(2)];
        store.save(&places).await.unwrap();
        let before = std::fs::read(store.data_file()).unwrap();

        let taken_at =
            NaiveDateTime::parse_from_str("2025-01-31 23:59:58", "%Y-%m-%d %H:%M:%S").unwrap();
        let file_name = store.backup(&places[..1], taken_at).await.unwrap();

        assert_eq!(file_name, "places_backup_20250131_235958.json");
        let backup = std::fs::read(dir.0.join("backups").join(&file_name)).unwrap();
        let backed_up: Vec<Place> = serde_json::from_slice(&backup).unwrap();
        assert_eq!(backed_up, places[..1].to_vec());
        assert_eq!(std::fs::read(store.data_file()).unwrap(), before);
    }
}
