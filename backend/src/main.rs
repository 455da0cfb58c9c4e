//! Backend entry-point: reads settings, prepares PostgreSQL, and serves the
//! REST API, probes, OpenAPI docs and (in production) the front-end bundle.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::Settings;
use server::{ServerConfig, create_server, drain_on_shutdown, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;

    let database_url = settings.database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.clone()).with_max_size(settings.pool_size),
    )
    .await
    .map_err(std::io::Error::other)?;

    info!(
        bind_addr = %settings.bind_addr,
        production = settings.mode.is_production(),
        "starting server"
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(settings, pool))?;
    actix_web::rt::spawn(drain_on_shutdown(
        health_state,
        server.handle(),
        shutdown_signal(),
    ));
    server.await
}
