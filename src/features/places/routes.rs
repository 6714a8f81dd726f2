use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::places::handlers;
use crate::features::places::services::PlaceService;

/// Create routes for the places feature
///
/// The collection is reachable under both `/api/places` and `/api/positions`.
pub fn routes(service: Arc<PlaceService>) -> Router {
    let mut router = Router::new();

    for base in ["/api/places", "/api/positions"] {
        router = router
            .route(
                base,
                get(handlers::list_places).post(handlers::create_place),
            )
            .route(
                &format!("{}/{{id}}", base),
                get(handlers::get_place)
                    .put(handlers::update_place)
                    .delete(handlers::delete_place),
            );
    }

    router
        .route("/api/types", get(handlers::list_types))
        .route("/api/save", post(handlers::save_data))
        .route("/api/export", get(handlers::export_data))
        .route("/api/backup", post(handlers::create_backup))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::places::models::Place;
    use crate::features::places::validation::ValidationMode;
    use crate::shared::test_helpers::{place_service, sample_place, ReadOnlyStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(mode: ValidationMode) -> TestServer {
        let (service, _) = place_service(mode);
        TestServer::new(routes(service)).unwrap()
    }

    fn port() -> Value {
        json!({
            "name": "Port",
            "type": "Harbor",
            "lat": 18.08,
            "lng": -15.97,
            "quartier": "Centre"
        })
    }

    #[tokio::test]
    async fn test_create_list_delete_scenario() {
        let server = server(ValidationMode::Strict);

        let response = server.post("/api/places").json(&port()).await;
        response.assert_status(StatusCode::CREATED);
        let first: Place = response.json();
        assert_eq!(first.id, 1);

        let mut second = port();
        second["name"] = json!("Marché Capitale");
        let response = server.post("/api/places").json(&second).await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Place>().id, 2);

        let response = server.delete("/api/places/1").await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["message"],
            "Place deleted successfully"
        );

        let places: Vec<Place> = server.get("/api/places").await.json();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, 2);

        server.get("/api/places/1").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_positions_alias_shares_the_collection() {
        let server = server(ValidationMode::Lenient);

        server
            .post("/api/positions")
            .json(&json!({"name": "Stade", "type": "Stadium", "lat": "18.1", "lng": "-15.95"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/places/1").await;
        response.assert_status_ok();
        let place: Place = response.json();
        assert_eq!(place.lat, 18.1);
        assert_eq!(place.quartier, "");

        let places: Vec<Place> = server.get("/api/positions").await.json();
        assert_eq!(places, vec![place]);
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let server = server(ValidationMode::Strict);

        let mut missing = port();
        missing.as_object_mut().unwrap().remove("quartier");
        let response = server.post("/api/places").json(&missing).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Field 'quartier' is required"
        );

        let mut out_of_range = port();
        out_of_range["lng"] = json!(200.0);
        server
            .post("/api/places")
            .json(&out_of_range)
            .await
            .assert_status_bad_request();

        let mut not_a_number = port();
        not_a_number["lat"] = json!("north");
        server
            .post("/api/places")
            .json(&not_a_number)
            .await
            .assert_status_bad_request();

        server
            .post("/api/places")
            .json(&json!([1, 2, 3]))
            .await
            .assert_status_bad_request();

        let places: Vec<Place> = server.get("/api/places").await.json();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_update_statuses() {
        let server = server(ValidationMode::Strict);
        server.post("/api/places").json(&port()).await;

        let mut renamed = port();
        renamed["name"] = json!("Port de l'Amitié");
        let response = server.put("/api/places/1").json(&renamed).await;
        response.assert_status_ok();
        let place: Place = response.json();
        assert_eq!(place.name, "Port de l'Amitié");
        assert!(place.updated_at.is_some());

        server
            .put("/api/places/9")
            .json(&renamed)
            .await
            .assert_status_not_found();

        server
            .put("/api/places/1")
            .json(&json!({"name": "Only a name"}))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_non_numeric_id_gets_json_error() {
        let server = server(ValidationMode::Strict);

        for response in [
            server.get("/api/places/abc").await,
            server.put("/api/positions/abc").json(&port()).await,
            server.delete("/api/places/abc").await,
        ] {
            response.assert_status_bad_request();
            let body: Value = response.json();
            assert!(body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid path parameter"));
        }
    }

    #[tokio::test]
    async fn test_list_filter_and_types() {
        let server = server(ValidationMode::Lenient);
        for (name, place_type) in [("A", "School"), ("B", "Harbor"), ("C", "School")] {
            server
                .post("/api/places")
                .json(&json!({"name": name, "type": place_type, "lat": 18.0, "lng": -16.0}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let schools: Vec<Place> = server
            .get("/api/places")
            .add_query_param("type", "School")
            .await
            .json();
        assert_eq!(schools.len(), 2);

        let harbors: Vec<Place> = server
            .get("/api/positions")
            .add_query_param("category", "Harbor")
            .await
            .json();
        assert_eq!(harbors.len(), 1);

        let types: Vec<String> = server.get("/api/types").await.json();
        assert_eq!(types, vec!["Harbor", "School"]);
    }

    #[tokio::test]
    async fn test_archive_endpoints() {
        let server = server(ValidationMode::Strict);
        server.post("/api/places").json(&port()).await;

        let saved: Value = server.post("/api/save").await.json();
        assert_eq!(saved["count"], 1);

        let export: Value = server.get("/api/export").await.json();
        assert_eq!(export["export_info"]["total_places"], 1);
        assert_eq!(export["export_info"]["version"], "1.0");
        assert_eq!(export["places"][0]["name"], "Port");

        let backup: Value = server.post("/api/backup").await.json();
        assert_eq!(backup["count"], 1);
        assert!(backup["backup_file"]
            .as_str()
            .unwrap()
            .starts_with("places_backup_"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_a_server_error() {
        let service = Arc::new(PlaceService::new(
            Arc::new(ReadOnlyStore(vec![sample_place(1)])),
            ValidationMode::Strict,
        ));
        let server = TestServer::new(routes(service)).unwrap();

        let response = server.post("/api/backup").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("read-only file system"));

        server.get("/api/export").await.assert_status_ok();
    }
}
