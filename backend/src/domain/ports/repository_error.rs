//! Failure vocabulary shared by every repository port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// A pooled connection could not be obtained.
        Connection { message: String } =>
            "repository connection failed: {message}",
        /// The statement failed or its rows could not be decoded.
        Query { message: String } =>
            "repository query failed: {message}",
        /// The write collides with an existing unique value.
        Conflict { message: String } =>
            "unique constraint violated: {message}",
        /// The write names a parent row that does not exist.
        InvalidReference { message: String } =>
            "referenced row does not exist: {message}",
    }
}
