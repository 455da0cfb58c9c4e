//! Domain ports defining the edges of the hexagon.
//!
//! Every repository reports failures through the closed [`RepositoryError`]
//! so inbound adapters can map them to HTTP statuses without knowing which
//! store sits behind the port.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_repository;
mod catalogue_repository;
mod gps_repository;
mod repository_error;
mod wiring_diagram_repository;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::CartRepository;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::CatalogueRepository;
#[cfg(test)]
pub use gps_repository::MockGpsRepository;
pub use gps_repository::GpsRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use wiring_diagram_repository::MockWiringDiagramRepository;
pub use wiring_diagram_repository::WiringDiagramRepository;
