//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("Failed to fetch brands")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "name"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("Brand not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("exists"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_their_message_but_drop_details(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Failed to fetch brands");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_details(
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"field": "name"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("Part not found");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.message(), "Part not found");
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn body_keeps_the_error_field_for_existing_clients() {
    let body = serde_json::to_value(client_payload(&Error::not_found("Model not found")))
        .expect("serialise");
    assert_eq!(body["error"], "Model not found");
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case(RepositoryError::connection("pool timed out"))]
#[case(RepositoryError::query("column \"x\" does not exist"))]
fn store_failures_become_static_internal_errors(#[case] err: RepositoryError) {
    let mapped = map_repository_error(err, "Failed to fetch suppliers");

    assert_eq!(mapped.code(), ErrorCode::InternalError);
    assert_eq!(mapped.message(), "Failed to fetch suppliers");
    assert!(mapped.details().is_none());
}

#[rstest]
fn unique_violations_become_conflicts() {
    let mapped = map_repository_error(
        RepositoryError::conflict("brands_name_key"),
        "Failed to create brand",
    );

    assert_eq!(mapped.code(), ErrorCode::Conflict);
    assert_eq!(
        mapped.details(),
        Some(&json!({"constraint": "brands_name_key"}))
    );
}

#[rstest]
fn dangling_references_become_invalid_requests() {
    let mapped = map_repository_error(
        RepositoryError::invalid_reference("models_brand_id_fkey"),
        "Failed to create model",
    );

    assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        mapped.details(),
        Some(&json!({"constraint": "models_brand_id_fkey"}))
    );
}

#[test]
fn from_actix_error_is_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
