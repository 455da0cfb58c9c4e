//! Extractor configuration shared by the server and handler tests.
//!
//! Actix answers malformed JSON, query strings and multipart bodies with its
//! own plain-text errors. These configs route those failures through the
//! domain [`Error`] so clients always see the JSON envelope.

use actix_multipart::form::MultipartFormConfig;
use actix_web::web;
use serde_json::json;

use crate::domain::Error;

/// Upper bound on a single uploaded diagram image.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Slack for the text fields that travel with an upload.
const FORM_FIELD_ALLOWANCE: usize = 64 * 1024;

fn invalid_body(message: &'static str, reason: impl ToString) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "reason": reason.to_string() }))
        .into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| invalid_body("Invalid request body", err))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| invalid_body("Invalid query string", err))
}

pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(MAX_UPLOAD_BYTES + FORM_FIELD_ALLOWANCE)
        .total_limit(MAX_UPLOAD_BYTES + FORM_FIELD_ALLOWANCE)
        .error_handler(|err, _req| invalid_body("Invalid upload", err))
}

/// Register every extractor config on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(multipart_config());
}
