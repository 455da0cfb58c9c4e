//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! The service has a single driven dependency, PostgreSQL, reached through
//! the Diesel adapters in [`persistence`]. Adapters translate between rows
//! and domain types and hold no business rules.

pub mod persistence;
