//! Catalogue search endpoint: `GET /api/search?q=<term>`.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{SearchResults, SearchTerm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error_with};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring to look for.
    pub q: Option<String>,
}

/// Search brands, models, parts and suppliers at once.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Hits grouped by entity", body = SearchResults),
        (status = 400, description = "Missing or blank query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["search"],
    operation_id = "search"
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<SearchResults>> {
    let term = query
        .q
        .as_deref()
        .and_then(|raw| SearchTerm::new(raw).ok())
        .ok_or_else(|| missing_field_error_with(FieldName::new("q"), "Search query is required"))?;
    state
        .catalogue
        .search(&term)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to search"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{CatalogueRepository, MockCatalogueRepository, RepositoryError};
    use crate::domain::{NewBrand, NewPart, NewSupplier, NewVehicleModel};
    use crate::inbound::http::test_utils::test_app;
    use crate::test_support::{InMemoryStore, http_state, http_state_with};

    async fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::default());
        let brand = store
            .create_brand(&NewBrand {
                name: "Club Car".to_owned(),
                description: Some("Golf and utility vehicles".to_owned()),
                ..NewBrand::default()
            })
            .await
            .expect("brand");
        store
            .create_model(&NewVehicleModel {
                brand_id: brand.id,
                name: "Onward".to_owned(),
                vehicle_type: Some("golf cart".to_owned()),
                ..NewVehicleModel::default()
            })
            .await
            .expect("model");
        store
            .create_supplier(&NewSupplier {
                name: "Golf Cart Garage".to_owned(),
                ..NewSupplier::default()
            })
            .await
            .expect("supplier");
        store
            .create_part(&NewPart {
                part_number: "BAT-12V-105".to_owned(),
                name: "Deep cycle battery".to_owned(),
                description: None,
                category: Some("Batteries".to_owned()),
                price: None,
                supplier_id: None,
                compatible_brands: Vec::new(),
                compatible_models: Vec::new(),
                in_stock: true,
                image_url: None,
                specifications: None,
            })
            .await
            .expect("part");
        store
    }

    fn names(bucket: &Value) -> Vec<&str> {
        bucket
            .as_array()
            .map(|rows| rows.iter().filter_map(|row| row["name"].as_str()).collect())
            .unwrap_or_default()
    }

    #[rstest]
    #[actix_web::test]
    async fn hits_are_grouped_by_entity() {
        let app = test::init_service(test_app(http_state_with(seeded_store().await))).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/search?q=GOLF").to_request(),
        )
        .await;

        assert_eq!(names(&body["brands"]), ["Club Car"]);
        assert_eq!(names(&body["models"]), ["Onward"]);
        assert_eq!(names(&body["suppliers"]), ["Golf Cart Garage"]);
        assert_eq!(body["parts"], Value::Array(Vec::new()));
    }

    #[rstest]
    #[actix_web::test]
    async fn part_numbers_are_searched() {
        let app = test::init_service(test_app(http_state_with(seeded_store().await))).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/search?q=12v").to_request(),
        )
        .await;

        assert_eq!(names(&body["parts"]), ["Deep cycle battery"]);
        assert_eq!(body["parts"][0]["partNumber"], "BAT-12V-105");
        for bucket in ["brands", "models", "suppliers"] {
            assert_eq!(body[bucket], Value::Array(Vec::new()), "{bucket}");
        }
    }

    #[rstest]
    #[case("/api/search")]
    #[case("/api/search?q=")]
    #[case("/api/search?q=%20%20")]
    #[actix_web::test]
    async fn missing_query_is_rejected(#[case] uri: &str) {
        let app = test::init_service(test_app(http_state())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Search query is required");
        assert_eq!(body["details"]["field"], "q");
    }

    #[rstest]
    #[actix_web::test]
    async fn failing_search_returns_no_partial_results() {
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_search()
            .return_once(|_| Err(RepositoryError::connection("pool timed out")));
        let mut state = http_state();
        state.catalogue = Arc::new(catalogue);
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/search?q=cart").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Failed to search");
        assert!(body.get("brands").is_none());
    }
}
