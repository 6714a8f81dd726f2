use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::places::dtos::{
    BackupResponseDto, ExportInfoDto, ExportResponseDto, PlaceInputDto, SaveResponseDto,
};
use crate::features::places::models::Place;
use crate::features::places::validation::{validate_changes, validate_new, ValidationMode};
use crate::modules::storage::{next_id, PlaceStore};

const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Service for place operations
///
/// Each mutation loads the whole collection, changes it and writes it back.
/// Mutations hold `write_lock` for that whole cycle so concurrent requests in
/// this process cannot overwrite each other's changes.
pub struct PlaceService {
    store: Arc<dyn PlaceStore>,
    mode: ValidationMode,
    write_lock: Mutex<()>,
}

impl PlaceService {
    pub fn new(store: Arc<dyn PlaceStore>, mode: ValidationMode) -> Self {
        Self {
            store,
            mode,
            write_lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("Place {} not found", id))
    }

    /// List places in stored order, optionally keeping a single type
    pub async fn list(&self, place_type: Option<&str>) -> Result<Vec<Place>> {
        let places = self.store.load().await?;

        Ok(match place_type {
            Some(place_type) => places
                .into_iter()
                .filter(|p| p.has_type(place_type))
                .collect(),
            None => places,
        })
    }

    /// Distinct type labels, sorted
    pub async fn types(&self) -> Result<Vec<String>> {
        let places = self.store.load().await?;

        let types: BTreeSet<String> = places.into_iter().map(|p| p.place_type).collect();
        Ok(types.into_iter().collect())
    }

    pub async fn get(&self, id: i64) -> Result<Place> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn create(&self, input: PlaceInputDto) -> Result<Place> {
        let new_place = validate_new(&input, self.mode)?;

        let _guard = self.write_lock.lock().await;
        let mut places = self.store.load().await?;

        let place = new_place.into_place(next_id(&places), Self::now());
        places.push(place.clone());
        self.store.save(&places).await?;

        tracing::info!(
            "Place created: id={}, name={}, type={}",
            place.id,
            place.name,
            place.place_type
        );

        Ok(place)
    }

    pub async fn update(&self, id: i64, input: PlaceInputDto) -> Result<Place> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.store.load().await?;

        let place = places
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        let changes = validate_changes(&input, self.mode)?;
        let previous_name = place.name.clone();
        changes.apply(place, Self::now());
        let updated = place.clone();

        self.store.save(&places).await?;

        tracing::info!(
            "Place updated: id={}, name={} -> {}",
            id,
            previous_name,
            updated.name
        );

        Ok(updated)
    }

    /// Remove a place and return it
    pub async fn delete(&self, id: i64) -> Result<Place> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.store.load().await?;

        let index = places
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        let removed = places.remove(index);

        self.store.save(&places).await?;

        tracing::info!("Place deleted: id={}, name={}", id, removed.name);

        Ok(removed)
    }

    /// Rewrite the backing document with its current content
    pub async fn save(&self) -> Result<SaveResponseDto> {
        let _guard = self.write_lock.lock().await;
        let places = self.store.load().await?;
        self.store.save(&places).await?;

        tracing::info!("Manual save completed: {} places", places.len());

        Ok(SaveResponseDto {
            message: "Data saved successfully".to_string(),
            count: places.len(),
            timestamp: Self::now(),
        })
    }

    pub async fn export(&self) -> Result<ExportResponseDto> {
        let places = self.store.load().await?;

        Ok(ExportResponseDto {
            export_info: ExportInfoDto {
                total_places: places.len(),
                export_date: Self::now(),
                version: EXPORT_FORMAT_VERSION.to_string(),
            },
            places,
        })
    }

    pub async fn backup(&self) -> Result<BackupResponseDto> {
        let places = self.store.load().await?;
        let taken_at = Self::now();
        let backup_file = self.store.backup(&places, taken_at).await?;

        Ok(BackupResponseDto {
            message: "Backup created successfully".to_string(),
            backup_file,
            count: places.len(),
            timestamp: taken_at,
        })
    }
}
