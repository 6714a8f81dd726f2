use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::places::dtos::{ListPlacesQuery, PlaceInputDto};
use crate::features::places::models::Place;
use crate::features::places::services::PlaceService;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// List all places
///
/// Also served at `/api/positions`.
#[utoipa::path(
    get,
    path = "/api/places",
    params(ListPlacesQuery),
    responses(
        (status = 200, description = "Places in stored order", body = Vec<Place>),
    ),
    tag = "places"
)]
pub async fn list_places(
    State(service): State<Arc<PlaceService>>,
    Query(query): Query<ListPlacesQuery>,
) -> Result<Json<Vec<Place>>> {
    let places = service.list(query.place_type.as_deref()).await?;
    Ok(Json(places))
}

/// Get a place by id
#[utoipa::path(
    get,
    path = "/api/places/{id}",
    params(
        ("id" = i64, Path, description = "Place id")
    ),
    responses(
        (status = 200, description = "Place found", body = Place),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn get_place(
    State(service): State<Arc<PlaceService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Place>> {
    let place = service.get(id).await?;
    Ok(Json(place))
}

/// Create a place
#[utoipa::path(
    post,
    path = "/api/places",
    request_body = PlaceInputDto,
    responses(
        (status = 201, description = "Place created", body = Place),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn create_place(
    State(service): State<Arc<PlaceService>>,
    AppJson(dto): AppJson<PlaceInputDto>,
) -> Result<(StatusCode, Json<Place>)> {
    let place = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

/// Update a place
///
/// In strict mode every content field must be sent; in lenient mode only the
/// fields sent are changed.
#[utoipa::path(
    put,
    path = "/api/places/{id}",
    params(
        ("id" = i64, Path, description = "Place id")
    ),
    request_body = PlaceInputDto,
    responses(
        (status = 200, description = "Place updated", body = Place),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn update_place(
    State(service): State<Arc<PlaceService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<PlaceInputDto>,
) -> Result<Json<Place>> {
    let place = service.update(id, dto).await?;
    Ok(Json(place))
}

/// Delete a place
#[utoipa::path(
    delete,
    path = "/api/places/{id}",
    params(
        ("id" = i64, Path, description = "Place id")
    ),
    responses(
        (status = 200, description = "Place deleted", body = MessageResponse),
        (status = 404, description = "Place not found", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn delete_place(
    State(service): State<Arc<PlaceService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>> {
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("Place deleted successfully")))
}

/// List the distinct place types
#[utoipa::path(
    get,
    path = "/api/types",
    responses(
        (status = 200, description = "Sorted type labels", body = Vec<String>),
    ),
    tag = "places"
)]
pub async fn list_types(State(service): State<Arc<PlaceService>>) -> Result<Json<Vec<String>>> {
    let types = service.types().await?;
    Ok(Json(types))
}
