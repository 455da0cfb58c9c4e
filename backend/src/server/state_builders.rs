//! Builders wiring the Diesel adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselCartRepository, DieselCatalogueRepository, DieselGpsRepository,
    DieselWiringDiagramRepository,
};

/// Build HTTP state whose ports all share `pool`.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(DieselCatalogueRepository::new(pool.clone())),
        Arc::new(DieselWiringDiagramRepository::new(pool.clone())),
        Arc::new(DieselCartRepository::new(pool.clone())),
        Arc::new(DieselGpsRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ))
}
