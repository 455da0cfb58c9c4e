//! Shared helpers for the repository integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! cluster bootstrap, database provisioning and skip handling live here.

mod cluster_skip;
mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;

use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`, which
/// hides the SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// A migrated scratch database with a pool and a runtime to drive it.
pub struct TestDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Run one future to completion on the suite's runtime.
    pub fn block_on<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }
}

/// Start a cluster, create a uniquely named database and apply migrations.
pub fn provision_database(prefix: &str) -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = pg_embed::test_cluster()?;

    let name = format!("{prefix}_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let database_url = cluster.connection().database_url(&name);
    run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url)
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestDatabase {
        pool,
        runtime,
        _cluster: cluster,
    })
}
