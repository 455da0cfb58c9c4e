//! Shared Diesel error mapping for every repository adapter.
//!
//! Constraint violations become typed port errors so inbound adapters can
//! answer 409 or 400; everything else collapses into `query` or
//! `connection`. Database messages are logged at debug level and carried in
//! the port error, never in the HTTP payload.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures into a connection error.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

/// Map Diesel failures into the closed repository error.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(kind, info) => {
            let constraint = info
                .constraint_name()
                .unwrap_or_else(|| info.message())
                .to_owned();
            match kind {
                DatabaseErrorKind::UniqueViolation => RepositoryError::conflict(constraint),
                DatabaseErrorKind::ForeignKeyViolation => {
                    RepositoryError::invalid_reference(constraint)
                }
                DatabaseErrorKind::ClosedConnection => {
                    RepositoryError::connection("database connection error")
                }
                _ => RepositoryError::query(info.message().to_owned()),
            }
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DeserializationError(err) => {
            RepositoryError::query(format!("row decoding failed: {err}"))
        }
        _ => RepositoryError::query("database error"),
    }
}
