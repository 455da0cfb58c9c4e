//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CartRepository, CatalogueRepository, GpsRepository, WiringDiagramRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub wiring_diagrams: Arc<dyn WiringDiagramRepository>,
    pub cart: Arc<dyn CartRepository>,
    pub gps: Arc<dyn GpsRepository>,
    /// Source of "now" for health timestamps and untimed tracking points.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::HttpState;
    /// use backend::test_support::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let _state = HttpState::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(
        catalogue: Arc<dyn CatalogueRepository>,
        wiring_diagrams: Arc<dyn WiringDiagramRepository>,
        cart: Arc<dyn CartRepository>,
        gps: Arc<dyn GpsRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            catalogue,
            wiring_diagrams,
            cart,
            gps,
            clock,
        }
    }
}
