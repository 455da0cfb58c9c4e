//! Request middleware.
//!
//! [`Trace`] wraps the whole application so every request, including
//! probes and static assets, gets a correlation id and a completion log.

pub mod trace;

pub use trace::Trace;
