//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `/api` handler plus the probes. Request and
//! response bodies are picked up from the handler annotations; the error
//! envelope is registered explicitly because it is described by a wrapper
//! rather than derived on the domain type.
//!
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ErrorCode;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::wiring_diagrams::WiringDiagramUpload;

/// Describe the cookie that carries the cart identity.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private cookie issued on the first cart write.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Golf cart catalogue API",
        description = "Brands, models, wiring diagrams, parts, suppliers, a session cart and GPS routes for golf carts and low-speed vehicles.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::heartbeat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::brands::list_brands,
        crate::inbound::http::brands::get_brand,
        crate::inbound::http::brands::create_brand,
        crate::inbound::http::models::list_models,
        crate::inbound::http::models::get_model,
        crate::inbound::http::models::create_model,
        crate::inbound::http::models::update_model,
        crate::inbound::http::wiring_diagrams::list_wiring_diagrams,
        crate::inbound::http::wiring_diagrams::get_wiring_diagram,
        crate::inbound::http::wiring_diagrams::get_wiring_diagram_image,
        crate::inbound::http::wiring_diagrams::create_wiring_diagram,
        crate::inbound::http::parts::list_parts,
        crate::inbound::http::parts::get_part,
        crate::inbound::http::parts::create_part,
        crate::inbound::http::suppliers::list_suppliers,
        crate::inbound::http::suppliers::get_supplier,
        crate::inbound::http::suppliers::create_supplier,
        crate::inbound::http::cart::list_cart,
        crate::inbound::http::cart::add_to_cart,
        crate::inbound::http::cart::update_cart_item,
        crate::inbound::http::cart::remove_cart_item,
        crate::inbound::http::cart::clear_cart,
        crate::inbound::http::gps::list_routes,
        crate::inbound::http::gps::get_route,
        crate::inbound::http::gps::create_route,
        crate::inbound::http::gps::start_navigation,
        crate::inbound::http::gps::get_navigation,
        crate::inbound::http::gps::update_navigation,
        crate::inbound::http::gps::record_tracking,
        crate::inbound::http::gps::list_tracking,
        crate::inbound::http::search::search,
    ),
    components(schemas(ErrorSchema, ErrorCode, WiringDiagramUpload)),
    tags(
        (name = "health", description = "Heartbeat and orchestration probes"),
        (name = "brands", description = "Vehicle manufacturers"),
        (name = "models", description = "Vehicle models per brand"),
        (name = "wiring-diagrams", description = "Wiring diagrams with inline images"),
        (name = "parts", description = "Parts catalogue"),
        (name = "suppliers", description = "Parts suppliers"),
        (name = "cart", description = "Shopping cart scoped to the session cookie"),
        (name = "gps", description = "Routes, navigation sessions and tracking points"),
        (name = "search", description = "Catalogue-wide text search")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(error))) = schemas.get(ERROR_SCHEMA_NAME) else {
            panic!("expected Object schema for {ERROR_SCHEMA_NAME}");
        };

        for field in ["error", "code", "traceId", "details"] {
            assert!(error.properties.contains_key(field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/health")]
    #[case("/health/ready")]
    #[case("/api/brands/{id}")]
    #[case("/api/wiring-diagrams/{id}/image")]
    #[case("/api/cart/{id}")]
    #[case("/api/gps/navigation/{sessionId}")]
    #[case("/api/search")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn cart_operations_share_one_path_item() {
        let doc = ApiDoc::openapi();
        let cart = doc.paths.paths.get("/api/cart").expect("cart path");
        assert!(cart.get.is_some());
        assert!(cart.post.is_some());
        assert!(cart.delete.is_some());
    }
}
