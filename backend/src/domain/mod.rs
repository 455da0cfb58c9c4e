//! Domain primitives and aggregates.
//!
//! Purpose: define the catalogue, cart and GPS entities shared by the HTTP
//! and persistence adapters, plus the ports those adapters implement. Types
//! here know nothing about Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - TraceId: request-scoped correlation identifier.
//! - Catalogue, wiring, cart, GPS and search entities.
//! - `ports`: repository traits implemented by outbound adapters.

pub mod cart;
pub mod catalogue;
pub mod error;
pub mod gps;
pub mod ports;
pub mod search;
pub mod trace_id;
pub mod wiring;

pub use self::cart::{CartItem, CartSessionId, CartValidationError, NewCartItem, Quantity};
pub use self::catalogue::{
    Brand, ModelFilter, NewBrand, NewPart, NewSupplier, NewVehicleModel, Part, PartFilter,
    Supplier, VehicleModel, VehicleModelUpdate,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::gps::{
    GpsRoute, GpsValidationError, NavigationSession, NavigationSessionChanges, NewGpsRoute,
    NewNavigationSession, NewTrackingPoint, RouteFilter, TrackingPoint,
};
pub use self::search::{SearchResults, SearchTerm, SearchTermError};
pub use self::trace_id::TraceId;
pub use self::wiring::{
    DEFAULT_IMAGE_MIME, DiagramFilter, DiagramImage, DiagramUpload, NewWiringDiagram,
    WiringDiagram,
};

