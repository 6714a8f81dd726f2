//! Write-side validation for place records.
//!
//! Both modes reject absent or blank required fields and coordinates outside
//! the geographic range. They differ on `quartier` and on updates:
//!
//! | Mode | `quartier` | Update |
//! |------|------------|--------|
//! | `strict` | required | every content field required, content fully replaced |
//! | `lenient` | optional | only supplied fields are validated and merged |

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDateTime;
use thiserror::Error;
use validator::Validate;

use crate::features::places::dtos::{CoordinateInput, PlaceInputDto};
use crate::features::places::models::Place;

const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LNG_RANGE: RangeInclusive<f64> = -180.0..=180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Strict,
    Lenient,
}

impl ValidationMode {
    fn requires_quartier(self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            other => Err(format!(
                "VALIDATION_MODE must be 'strict' or 'lenient', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Strict => f.write_str("strict"),
            ValidationMode::Lenient => f.write_str("lenient"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PlaceValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid fields: {}", .0.join("; "))]
    InvalidField(Vec<String>),
}

impl PlaceValidationError {
    /// Individual messages, one per offending field
    pub fn details(&self) -> Vec<String> {
        match self {
            PlaceValidationError::InvalidField(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<validator::ValidationErrors> for PlaceValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        PlaceValidationError::InvalidField(messages)
    }
}

/// Normalized values for a brand new place
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub name: String,
    pub place_type: String,
    pub quartier: String,
    pub commune: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub google_place_id: Option<String>,
    pub rating: Option<f64>,
    pub address: Option<String>,
}

impl NewPlace {
    pub fn into_place(self, id: i64, created_at: NaiveDateTime) -> Place {
        Place {
            id,
            name: self.name,
            place_type: self.place_type,
            quartier: self.quartier,
            commune: self.commune,
            lat: self.lat,
            lng: self.lng,
            created_at: Some(created_at),
            updated_at: None,
            last_modified: None,
            google_place_id: self.google_place_id,
            rating: self.rating,
            address: self.address,
            extra: Default::default(),
        }
    }
}

/// Normalized values to merge into an existing place; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceChanges {
    pub name: Option<String>,
    pub place_type: Option<String>,
    pub quartier: Option<String>,
    pub commune: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub google_place_id: Option<String>,
    pub rating: Option<f64>,
    pub address: Option<String>,
}

impl From<NewPlace> for PlaceChanges {
    fn from(p: NewPlace) -> Self {
        Self {
            name: Some(p.name),
            place_type: Some(p.place_type),
            quartier: Some(p.quartier),
            commune: p.commune,
            lat: Some(p.lat),
            lng: Some(p.lng),
            google_place_id: p.google_place_id,
            rating: p.rating,
            address: p.address,
        }
    }
}

impl PlaceChanges {
    /// Merge into `place` and stamp the modification time. The id is never touched.
    pub fn apply(self, place: &mut Place, modified_at: NaiveDateTime) {
        if let Some(name) = self.name {
            place.name = name;
        }
        if let Some(place_type) = self.place_type {
            place.place_type = place_type;
        }
        if let Some(quartier) = self.quartier {
            place.quartier = quartier;
        }
        if let Some(commune) = self.commune {
            place.commune = Some(commune);
            place.clear_raw("commune");
        }
        if let Some(lat) = self.lat {
            place.lat = lat;
        }
        if let Some(lng) = self.lng {
            place.lng = lng;
        }
        if let Some(google_place_id) = self.google_place_id {
            place.google_place_id = Some(google_place_id);
            place.clear_raw("google_place_id");
        }
        if let Some(rating) = self.rating {
            place.rating = Some(rating);
            place.clear_raw("rating");
        }
        if let Some(address) = self.address {
            place.address = Some(address);
            place.clear_raw("address");
        }
        place.updated_at = Some(modified_at);
        place.last_modified = Some(modified_at);
        place.clear_raw("updated_at");
        place.clear_raw("last_modified");
    }
}

/// Validate the input of a create request
pub fn validate_new(
    input: &PlaceInputDto,
    mode: ValidationMode,
) -> Result<NewPlace, PlaceValidationError> {
    // Presence is checked for every required field before any parsing
    let name = required_text(&input.name, "name")?;
    let place_type = required_text(&input.place_type, "type")?;
    let lat = required_coordinate(&input.lat, "lat")?;
    let lng = required_coordinate(&input.lng, "lng")?;
    let quartier = if mode.requires_quartier() {
        required_text(&input.quartier, "quartier")?
    } else {
        input
            .quartier
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    let lat = parse_coordinate(lat, "lat", LAT_RANGE)?;
    let lng = parse_coordinate(lng, "lng", LNG_RANGE)?;

    input.validate()?;

    Ok(NewPlace {
        name,
        place_type,
        quartier,
        commune: trimmed(&input.commune),
        lat,
        lng,
        google_place_id: input.google_place_id.clone(),
        rating: input.rating,
        address: input.address.clone(),
    })
}

/// Validate the input of an update request
pub fn validate_changes(
    input: &PlaceInputDto,
    mode: ValidationMode,
) -> Result<PlaceChanges, PlaceValidationError> {
    if mode == ValidationMode::Strict {
        return validate_new(input, mode).map(PlaceChanges::from);
    }

    let name = optional_text(&input.name, "name")?;
    let place_type = optional_text(&input.place_type, "type")?;
    let quartier = optional_text(&input.quartier, "quartier")?;
    let lat = optional_coordinate(&input.lat, "lat")?
        .map(|value| parse_coordinate(value, "lat", LAT_RANGE))
        .transpose()?;
    let lng = optional_coordinate(&input.lng, "lng")?
        .map(|value| parse_coordinate(value, "lng", LNG_RANGE))
        .transpose()?;

    input.validate()?;

    Ok(PlaceChanges {
        name,
        place_type,
        quartier,
        commune: trimmed(&input.commune),
        lat,
        lng,
        google_place_id: input.google_place_id.clone(),
        rating: input.rating,
        address: input.address.clone(),
    })
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|s| s.trim().to_string())
}

fn required_text(
    value: &Option<String>,
    field: &'static str,
) -> Result<String, PlaceValidationError> {
    optional_text(value, field)?.ok_or(PlaceValidationError::MissingField(field))
}

/// Absent stays absent; present but blank is a missing field
fn optional_text(
    value: &Option<String>,
    field: &'static str,
) -> Result<Option<String>, PlaceValidationError> {
    match value.as_deref().map(str::trim) {
        None => Ok(None),
        Some("") => Err(PlaceValidationError::MissingField(field)),
        Some(text) => Ok(Some(text.to_string())),
    }
}

fn required_coordinate<'a>(
    value: &'a Option<CoordinateInput>,
    field: &'static str,
) -> Result<&'a CoordinateInput, PlaceValidationError> {
    optional_coordinate(value, field)?.ok_or(PlaceValidationError::MissingField(field))
}

fn optional_coordinate<'a>(
    value: &'a Option<CoordinateInput>,
    field: &'static str,
) -> Result<Option<&'a CoordinateInput>, PlaceValidationError> {
    match value {
        None => Ok(None),
        Some(CoordinateInput::Text(text)) if text.trim().is_empty() => {
            Err(PlaceValidationError::MissingField(field))
        }
        Some(coordinate) => Ok(Some(coordinate)),
    }
}

fn parse_coordinate(
    value: &CoordinateInput,
    field: &'static str,
    range: RangeInclusive<f64>,
) -> Result<f64, PlaceValidationError> {
    let number = match value {
        CoordinateInput::Number(n) => *n,
        CoordinateInput::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            PlaceValidationError::InvalidCoordinate(format!("{} must be a number", field))
        })?,
    };

    if !number.is_finite() || !range.contains(&number) {
        return Err(PlaceValidationError::InvalidCoordinate(format!(
            "{} must be between {} and {}, got {}",
            field,
            range.start(),
            range.end(),
            number
        )));
    }

    Ok(number)
}
