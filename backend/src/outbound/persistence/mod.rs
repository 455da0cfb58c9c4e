//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the domain ports over a shared
//! [`DbPool`]. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module; callers only see domain types.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselCatalogueRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/golf_carts")).await?;
//! let catalogue = DieselCatalogueRepository::new(pool);
//! ```

mod diesel_cart_repository;
mod diesel_catalogue_repository;
mod diesel_error_mapping;
mod diesel_gps_repository;
mod diesel_wiring_diagram_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cart_repository::DieselCartRepository;
pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_gps_repository::DieselGpsRepository;
pub use diesel_wiring_diagram_repository::DieselWiringDiagramRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
