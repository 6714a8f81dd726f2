use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::places::dtos::{BackupResponseDto, ExportResponseDto, SaveResponseDto};
use crate::features::places::services::PlaceService;
use crate::shared::types::ErrorResponse;

/// Rewrite the data file with its current content
#[utoipa::path(
    post,
    path = "/api/save",
    responses(
        (status = 200, description = "Data saved", body = SaveResponseDto),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "archive"
)]
pub async fn save_data(State(service): State<Arc<PlaceService>>) -> Result<Json<SaveResponseDto>> {
    let saved = service.save().await?;
    Ok(Json(saved))
}

/// Export every place with export metadata
#[utoipa::path(
    get,
    path = "/api/export",
    responses(
        (status = 200, description = "Full export", body = ExportResponseDto),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "archive"
)]
pub async fn export_data(
    State(service): State<Arc<PlaceService>>,
) -> Result<Json<ExportResponseDto>> {
    let export = service.export().await?;
    Ok(Json(export))
}

/// Write a timestamped backup of the data file
#[utoipa::path(
    post,
    path = "/api/backup",
    responses(
        (status = 200, description = "Backup written", body = BackupResponseDto),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "archive"
)]
pub async fn create_backup(
    State(service): State<Arc<PlaceService>>,
) -> Result<Json<BackupResponseDto>> {
    let backup = service.backup().await?;
    Ok(Json(backup))
}
