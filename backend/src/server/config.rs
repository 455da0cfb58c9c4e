//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use backend::outbound::persistence::DbPool;
use backend::settings::Settings;

/// Everything [`super::create_server`] needs besides the health flags.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) static_dir: Option<PathBuf>,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Derive server configuration from validated settings. The static
    /// bundle is only served in production.
    #[must_use]
    pub fn new(settings: Settings, db_pool: DbPool) -> Self {
        let Settings {
            bind_addr,
            mode,
            static_dir,
            session,
            ..
        } = settings;
        Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            bind_addr,
            static_dir: mode.is_production().then_some(static_dir),
            db_pool,
        }
    }
}
