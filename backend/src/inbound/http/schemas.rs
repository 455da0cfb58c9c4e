//! OpenAPI schema definitions that cannot be derived on the domain type.
//!
//! [`crate::domain::Error`] serialises through a private DTO, so deriving
//! `ToSchema` on it would describe the wrong shape. The wrapper below mirrors
//! the wire envelope instead.

use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Brand not found")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCode,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, such as the offending field.
    details: Option<serde_json::Value>,
}
