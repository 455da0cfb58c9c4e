//! GPS route, navigation and tracking HTTP handlers.
//!
//! ```text
//! GET  /api/gps/routes?vehicleType=&maxSpeedLimit=
//! GET  /api/gps/routes/{id}
//! POST /api/gps/routes
//! POST /api/gps/navigation/start
//! GET  /api/gps/navigation/{sessionId}
//! PUT  /api/gps/navigation/{sessionId}
//! POST /api/gps/tracking
//! GET  /api/gps/tracking/{sessionId}
//! ```
//!
//! Navigation and tracking are keyed by the client-chosen session id, not by
//! the cart session cookie.

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{
    Error, GpsRoute, GpsValidationError, NavigationSession, NavigationSessionChanges,
    NewGpsRoute, NewNavigationSession, NewTrackingPoint, RouteFilter, TrackingPoint,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, non_blank, out_of_range_error, parse_optional_integer,
    parse_path_id,
};

/// Filters for listing routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RouteQuery {
    /// Route must list this vehicle type.
    pub vehicle_type: Option<String>,
    /// Upper bound on the route's speed limit.
    #[param(value_type = Option<i32>)]
    pub max_speed_limit: Option<String>,
}

impl TryFrom<RouteQuery> for RouteFilter {
    type Error = Error;

    fn try_from(query: RouteQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_type: non_blank(query.vehicle_type),
            max_speed_limit: parse_optional_integer(
                query.max_speed_limit.as_deref(),
                FieldName::new("maxSpeedLimit"),
            )?,
        })
    }
}

fn validation_error(err: GpsValidationError) -> Error {
    match err {
        GpsValidationError::EmptyName => missing_field_error(FieldName::new("name")),
        GpsValidationError::EmptySessionId => missing_field_error(FieldName::new("sessionId")),
        GpsValidationError::ScenicRatingOutOfRange(rating) => out_of_range_error(
            FieldName::new("scenicRating"),
            err.to_string(),
            i64::from(rating),
        ),
    }
}

#[utoipa::path(
    get,
    path = "/api/gps/routes",
    params(RouteQuery),
    responses(
        (status = 200, description = "Matching routes", body = [GpsRoute]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "listRoutes"
)]
#[get("/gps/routes")]
pub async fn list_routes(
    state: web::Data<HttpState>,
    query: web::Query<RouteQuery>,
) -> ApiResult<web::Json<Vec<GpsRoute>>> {
    let filter = RouteFilter::try_from(query.into_inner())?;
    state
        .gps
        .list_routes(&filter)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch GPS routes"))
}

#[utoipa::path(
    get,
    path = "/api/gps/routes/{id}",
    params(("id" = i32, Path, description = "Route id")),
    responses(
        (status = 200, description = "Route", body = GpsRoute),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "getRoute"
)]
#[get("/gps/routes/{id}")]
pub async fn get_route(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GpsRoute>> {
    let id = parse_path_id(&path, "GPS route")?;
    state
        .gps
        .find_route(id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch GPS route"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("GPS route not found"))
}

#[utoipa::path(
    post,
    path = "/api/gps/routes",
    request_body = NewGpsRoute,
    responses(
        (status = 201, description = "Route created", body = GpsRoute),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "createRoute"
)]
#[post("/gps/routes")]
pub async fn create_route(
    state: web::Data<HttpState>,
    payload: web::Json<NewGpsRoute>,
) -> ApiResult<HttpResponse> {
    let route = payload.into_inner();
    route.validate().map_err(validation_error)?;
    let created = state
        .gps
        .create_route(&route)
        .await
        .map_err(|err| map_repository_error(err, "Failed to create GPS route"))?;
    Ok(HttpResponse::Created().json(created))
}

/// Start following a route under a client-chosen session id.
#[utoipa::path(
    post,
    path = "/api/gps/navigation/start",
    request_body = NewNavigationSession,
    responses(
        (status = 201, description = "Navigation started", body = NavigationSession),
        (status = 400, description = "Invalid request or unknown route", body = ErrorSchema),
        (status = 409, description = "Session id already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "startNavigation"
)]
#[post("/gps/navigation/start")]
pub async fn start_navigation(
    state: web::Data<HttpState>,
    payload: web::Json<NewNavigationSession>,
) -> ApiResult<HttpResponse> {
    let session = payload.into_inner();
    session.validate().map_err(validation_error)?;
    let started = state
        .gps
        .start_navigation(&session)
        .await
        .map_err(|err| map_repository_error(err, "Failed to start navigation"))?;
    Ok(HttpResponse::Created().json(started))
}

#[utoipa::path(
    get,
    path = "/api/gps/navigation/{sessionId}",
    params(("sessionId" = String, Path, description = "Navigation session id")),
    responses(
        (status = 200, description = "Navigation session", body = NavigationSession),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "getNavigation"
)]
#[get("/gps/navigation/{session_id}")]
pub async fn get_navigation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NavigationSession>> {
    state
        .gps
        .find_navigation(&path)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch navigation session"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Navigation session not found"))
}

/// Apply a partial update. `completedAt` is only set when supplied.
#[utoipa::path(
    put,
    path = "/api/gps/navigation/{sessionId}",
    params(("sessionId" = String, Path, description = "Navigation session id")),
    request_body = NavigationSessionChanges,
    responses(
        (status = 200, description = "Updated session", body = NavigationSession),
        (status = 400, description = "Empty update", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "updateNavigation"
)]
#[put("/gps/navigation/{session_id}")]
pub async fn update_navigation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NavigationSessionChanges>,
) -> ApiResult<web::Json<NavigationSession>> {
    let changes = payload.into_inner();
    if changes.is_empty() {
        return Err(Error::invalid_request("No fields to update"));
    }
    state
        .gps
        .update_navigation(&path, &changes)
        .await
        .map_err(|err| map_repository_error(err, "Failed to update navigation session"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Navigation session not found"))
}

/// Append a position sample. A missing timestamp is stamped with the
/// server clock.
#[utoipa::path(
    post,
    path = "/api/gps/tracking",
    request_body = NewTrackingPoint,
    responses(
        (status = 201, description = "Point recorded", body = TrackingPoint),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "recordTrackingPoint"
)]
#[post("/gps/tracking")]
pub async fn record_tracking(
    state: web::Data<HttpState>,
    payload: web::Json<NewTrackingPoint>,
) -> ApiResult<HttpResponse> {
    let mut point = payload.into_inner();
    point.validate().map_err(validation_error)?;
    point.timestamp.get_or_insert_with(|| state.clock.utc());
    let recorded = state
        .gps
        .record_tracking_point(&point)
        .await
        .map_err(|err| map_repository_error(err, "Failed to record tracking point"))?;
    Ok(HttpResponse::Created().json(recorded))
}

#[utoipa::path(
    get,
    path = "/api/gps/tracking/{sessionId}",
    params(("sessionId" = String, Path, description = "Navigation session id")),
    responses(
        (status = 200, description = "Points in time order", body = [TrackingPoint]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["gps"],
    operation_id = "listTrackingPoints"
)]
#[get("/gps/tracking/{session_id}")]
pub async fn list_tracking(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TrackingPoint>>> {
    state
        .gps
        .list_tracking_points(&path)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch tracking points"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ports::MockGpsRepository;
    use crate::domain::ports::RepositoryError;
    use crate::inbound::http::test_utils::test_app;
    use crate::test_support::{FIXTURE_NOW, InMemoryStore, http_state, http_state_with};

    fn route_body(name: &str, vehicle_types: &[&str], max_speed_limit: i32) -> Value {
        json!({
            "name": name,
            "startLat": "33.4484000",
            "startLng": "-112.0740000",
            "endLat": "33.4500000",
            "endLng": "-112.0700000",
            "vehicleTypes": vehicle_types,
            "maxSpeedLimit": max_speed_limit,
        })
    }

    async fn post(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        body: Value,
    ) -> actix_web::dev::ServiceResponse {
        test::call_service(
            app,
            test::TestRequest::post().uri(uri).set_json(body).to_request(),
        )
        .await
    }

    #[rstest]
    #[case("/api/gps/routes", &["Lakeside", "Downtown", "Highway"])]
    #[case("/api/gps/routes?vehicleType=LSV", &["Lakeside", "Downtown"])]
    #[case("/api/gps/routes?maxSpeedLimit=25", &["Lakeside"])]
    #[case("/api/gps/routes?vehicleType=LSV&maxSpeedLimit=35", &["Lakeside", "Downtown"])]
    #[actix_web::test]
    async fn route_filters_combine(#[case] uri: &str, #[case] expected: &[&str]) {
        let app = test::init_service(test_app(http_state())).await;
        for (name, types, limit) in [
            ("Lakeside", &["LSV", "golf-cart"][..], 20),
            ("Downtown", &["LSV"][..], 35),
            ("Highway", &["UTV"][..], 45),
        ] {
            let res = post(&app, "/api/gps/routes", route_body(name, types, limit)).await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let routes: Vec<Value> =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request())
                .await;
        let names: Vec<&str> = routes.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn route_defaults_and_lookup() {
        let app = test::init_service(test_app(http_state())).await;
        let res = post(
            &app,
            "/api/gps/routes",
            json!({
                "name": "Lakeside",
                "startLat": "1.0",
                "startLng": "2.0",
                "endLat": "3.0",
                "endLng": "4.0"
            }),
        )
        .await;
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created["maxSpeedLimit"], 35);
        assert_eq!(created["isVerified"], false);

        let fetched: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/gps/routes/{}", created["id"]))
                .to_request(),
        )
        .await;
        assert_eq!(fetched, created);

        for uri in ["/api/gps/routes/404", "/api/gps/routes/lake"] {
            let res =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[rstest]
    #[case(json!({"scenicRating": 9}), "scenicRating")]
    #[case(json!({"name": "  "}), "name")]
    #[actix_web::test]
    async fn invalid_routes_are_rejected(#[case] overrides: Value, #[case] field: &str) {
        let app = test::init_service(test_app(http_state())).await;
        let mut body = route_body("Lakeside", &[], 20);
        if let (Some(target), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
            target.extend(extra.clone());
        }

        let res = post(&app, "/api/gps/routes", body).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn navigation_lifecycle() {
        let app = test::init_service(test_app(http_state())).await;
        let route: Value =
            test::read_body_json(post(&app, "/api/gps/routes", route_body("Loop", &[], 20)).await)
                .await;

        let start = json!({"routeId": route["id"], "sessionId": "nav-1"});
        let res = post(&app, "/api/gps/navigation/start", start.clone()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let started: Value = test::read_body_json(res).await;
        assert_eq!(started["status"], "active");
        assert_eq!(started["currentWaypointIndex"], 0);
        assert_eq!(started["completedAt"], Value::Null);

        let duplicate = post(&app, "/api/gps/navigation/start", start).await;
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let updated: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::put()
                .uri("/api/gps/navigation/nav-1")
                .set_json(json!({"status": "completed", "currentWaypointIndex": 3}))
                .to_request(),
        )
        .await;
        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["currentWaypointIndex"], 3);
        assert_eq!(updated["completedAt"], Value::Null);

        let fetched: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/gps/navigation/nav-1")
                .to_request(),
        )
        .await;
        assert_eq!(fetched, updated);
    }

    #[rstest]
    #[actix_web::test]
    async fn navigation_errors() {
        let app = test::init_service(test_app(http_state())).await;

        let unknown_route = post(
            &app,
            "/api/gps/navigation/start",
            json!({"routeId": 77, "sessionId": "nav-x"}),
        )
        .await;
        assert_eq!(unknown_route.status(), StatusCode::BAD_REQUEST);

        let missing = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/gps/navigation/ghost")
                .to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let empty_update = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/gps/navigation/ghost")
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(empty_update.status(), StatusCode::BAD_REQUEST);

        let missing_update = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/gps/navigation/ghost")
                .set_json(json!({"status": "paused"}))
                .to_request(),
        )
        .await;
        assert_eq!(missing_update.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn tracking_points_come_back_in_time_order() {
        let store = Arc::new(InMemoryStore::default());
        let app = test::init_service(test_app(http_state_with(store))).await;
        for (lat, timestamp) in [
            ("1.0", Some("2025-06-01T12:05:00Z")),
            ("2.0", Some("2025-06-01T11:00:00Z")),
            ("3.0", None),
        ] {
            let mut body = json!({"sessionId": "nav-1", "latitude": lat, "longitude": "0.5"});
            if let Some(ts) = timestamp {
                body["timestamp"] = json!(ts);
            }
            let res = post(&app, "/api/gps/tracking", body).await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }
        post(
            &app,
            "/api/gps/tracking",
            json!({"sessionId": "nav-2", "latitude": "9.0", "longitude": "9.0"}),
        )
        .await;

        let points: Vec<Value> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/gps/tracking/nav-1")
                .to_request(),
        )
        .await;

        let latitudes: Vec<&str> = points.iter().filter_map(|p| p["latitude"].as_str()).collect();
        assert_eq!(latitudes, ["2.0", "3.0", "1.0"]);
        assert_eq!(points[1]["timestamp"], FIXTURE_NOW);
    }

    #[rstest]
    #[actix_web::test]
    async fn tracking_needs_a_session_id() {
        let app = test::init_service(test_app(http_state())).await;

        let res = post(
            &app,
            "/api/gps/tracking",
            json!({"sessionId": "", "latitude": "1.0", "longitude": "1.0"}),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "sessionId");
    }

    #[rstest]
    #[actix_web::test]
    async fn tracking_store_failures_are_redacted() {
        let mut repo = MockGpsRepository::new();
        repo.expect_list_tracking_points()
            .returning(|_| Err(RepositoryError::query("relation missing")));
        let mut state = http_state();
        state.gps = Arc::new(repo);
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/gps/tracking/nav-1")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Failed to fetch tracking points");
        assert!(body.get("details").is_none());
    }
}
