//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers are registered under the `/api` scope by [`configure`]; the
//! server mounts readiness and liveness probes separately.

pub mod brands;
pub mod cart;
pub mod error;
pub mod extractors;
pub mod gps;
pub mod health;
pub mod models;
pub mod parts;
pub mod schemas;
pub mod search;
pub mod session;
pub mod session_config;
pub mod state;
pub mod suppliers;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod wiring_diagrams;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
///
/// let _app = App::new().service(web::scope("/api").configure(backend::inbound::http::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::heartbeat)
        .service(brands::list_brands)
        .service(brands::get_brand)
        .service(brands::create_brand)
        .service(models::list_models)
        .service(models::get_model)
        .service(models::create_model)
        .service(models::update_model)
        .service(wiring_diagrams::list_wiring_diagrams)
        .service(wiring_diagrams::get_wiring_diagram_image)
        .service(wiring_diagrams::get_wiring_diagram)
        .service(wiring_diagrams::create_wiring_diagram)
        .service(parts::list_parts)
        .service(parts::get_part)
        .service(parts::create_part)
        .service(suppliers::list_suppliers)
        .service(suppliers::get_supplier)
        .service(suppliers::create_supplier)
        .service(cart::list_cart)
        .service(cart::add_to_cart)
        .service(cart::update_cart_item)
        .service(cart::remove_cart_item)
        .service(cart::clear_cart)
        .service(gps::list_routes)
        .service(gps::get_route)
        .service(gps::create_route)
        .service(gps::start_navigation)
        .service(gps::get_navigation)
        .service(gps::update_navigation)
        .service(gps::record_tracking)
        .service(gps::list_tracking)
        .service(search::search);
}
