//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain and repository failures into one JSON envelope with
//! a fixed status per error code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::ports::RepositoryError;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal failures carry a static message already; only the details can
/// hold driver text, so they are dropped before serialisation.
fn client_payload(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error.redacted()
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Translate a port failure into the client-facing error.
///
/// `failure` is the static message used for connection and query failures,
/// for example `"Failed to fetch brands"`. The underlying cause is logged
/// and never reaches the response body.
///
/// # Examples
/// ```
/// use backend::domain::ErrorCode;
/// use backend::domain::ports::RepositoryError;
/// use backend::inbound::http::error::map_repository_error;
///
/// let err = map_repository_error(
///     RepositoryError::query("relation does not exist"),
///     "Failed to fetch parts",
/// );
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.message(), "Failed to fetch parts");
/// ```
pub fn map_repository_error(err: RepositoryError, failure: &'static str) -> Error {
    match err {
        RepositoryError::Conflict { message } => {
            Error::conflict("Resource already exists").with_details(json!({
                "constraint": message,
            }))
        }
        RepositoryError::InvalidReference { message } => {
            Error::invalid_request("Referenced resource does not exist").with_details(json!({
                "constraint": message,
            }))
        }
        other @ (RepositoryError::Connection { .. } | RepositoryError::Query { .. }) => {
            error!(error = %other, "{failure}");
            Error::internal(failure)
        }
    }
}

#[cfg(test)]
mod tests;
