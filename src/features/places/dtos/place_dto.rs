use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::places::models::Place;

/// Coordinate as sent by clients: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Request DTO for creating or updating a place
///
/// Which fields are mandatory depends on the configured validation mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlaceInputDto {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub place_type: Option<String>,

    pub quartier: Option<String>,

    #[validate(length(max = 500, message = "commune must not exceed 500 characters"))]
    pub commune: Option<String>,

    pub lat: Option<CoordinateInput>,

    pub lng: Option<CoordinateInput>,

    #[validate(length(max = 500, message = "google_place_id must not exceed 500 characters"))]
    pub google_place_id: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    #[validate(length(max = 500, message = "address must not exceed 500 characters"))]
    pub address: Option<String>,
}

/// Query params for listing places
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPlacesQuery {
    /// Exact category label to keep
    #[serde(rename = "type", alias = "category")]
    pub place_type: Option<String>,
}

/// Response DTO for the manual save endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveResponseDto {
    pub message: String,
    pub count: usize,
    pub timestamp: NaiveDateTime,
}

/// Metadata attached to an export
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportInfoDto {
    pub total_places: usize,
    pub export_date: NaiveDateTime,
    pub version: String,
}

/// Full dump of the collection
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportResponseDto {
    pub places: Vec<Place>,
    pub export_info: ExportInfoDto,
}

/// Response DTO for the backup endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BackupResponseDto {
    pub message: String,
    pub backup_file: String,
    pub count: usize,
    pub timestamp: NaiveDateTime,
}
