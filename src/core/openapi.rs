use utoipa::{Modify, OpenApi};

use crate::features::places::{
    dtos as places_dtos, handlers as places_handlers, models as places_models,
};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Places
        places_handlers::list_places,
        places_handlers::get_place,
        places_handlers::create_place,
        places_handlers::update_place,
        places_handlers::delete_place,
        places_handlers::list_types,
        // Archive
        places_handlers::save_data,
        places_handlers::export_data,
        places_handlers::create_backup,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Places
            places_models::Place,
            places_dtos::CoordinateInput,
            places_dtos::PlaceInputDto,
            places_dtos::SaveResponseDto,
            places_dtos::ExportInfoDto,
            places_dtos::ExportResponseDto,
            places_dtos::BackupResponseDto,
        )
    ),
    tags(
        (name = "places", description = "Points of interest (also under /api/positions)"),
        (name = "archive", description = "Save, export and backup of the data file"),
    ),
    info(
        title = "Placemap API",
        version = "0.1.0",
        description = "Points of interest stored in a JSON file",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
