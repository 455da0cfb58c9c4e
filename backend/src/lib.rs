//! Golf-cart catalogue backend.
//!
//! Hexagonal layout: `domain` holds entities and ports, `outbound` adapts
//! the ports to PostgreSQL, and `inbound::http` exposes them over Actix.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
