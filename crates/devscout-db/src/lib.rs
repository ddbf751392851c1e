//! Postgres persistence for devscout: pool construction, embedded
//! migrations, and the `candidates` / `sessions` tables.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

pub mod candidates;
pub mod sessions;

pub use candidates::{
    count_candidates, get_candidate_by_github_url, upsert_candidate, CandidateRow, NewCandidate,
};
pub use sessions::{create_session, latest_session, PgSessionStore, SessionRow};

// Relative to this crate's manifest, so it lands on <workspace-root>/migrations/.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connection-pool sizing and acquire behavior.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl PoolConfig {
    /// Pool settings from `DEVSCOUT_DB_*` env vars, falling back to the
    /// defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_connections: env_or("DEVSCOUT_DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: env_or("DEVSCOUT_DB_MIN_CONNECTIONS", defaults.min_connections),
            acquire_timeout: Duration::from_secs(env_or(
                "DEVSCOUT_DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )),
        }
    }

    /// Pool settings from an already-validated [`devscout_core::AppConfig`].
    #[must_use]
    pub fn from_app_config(config: &devscout_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout: Duration::from_secs(config.db_acquire_timeout_secs),
        }
    }
}

/// Opens a Postgres pool against an explicit URL.
///
/// # Errors
///
/// Returns [`sqlx::Error`] when the pool cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}

/// Opens a Postgres pool with `DATABASE_URL` and pool sizing taken from
/// the environment.
///
/// # Errors
///
/// Returns [`DbError::MissingDatabaseUrl`] when `DATABASE_URL` is unset,
/// or [`DbError::Sqlx`] when the connection fails.
pub async fn connect_pool_from_env() -> Result<PgPool, DbError> {
    let url = std::env::var("DATABASE_URL").map_err(|_| DbError::MissingDatabaseUrl)?;
    Ok(connect_pool(&url, PoolConfig::from_env()).await?)
}

/// Applies pending migrations and reports how many ran.
///
/// # Errors
///
/// Returns [`DbError::Migration`] when a migration fails, or
/// [`DbError::Sqlx`] when the bookkeeping query fails afterwards.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DbError> {
    let before = applied_count(pool).await;
    MIGRATOR.run(pool).await?;
    let after = applied_count(pool).await;

    Ok(usize::try_from(after.saturating_sub(before)).unwrap_or(0))
}

// On a fresh database the _sqlx_migrations table does not exist yet;
// count that as zero applied.
async fn applied_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = true")
        .fetch_one(pool)
        .await
        .unwrap_or(0)
}

/// Round-trips a trivial query to confirm the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] when the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

fn env_or<T: FromStr + Copy>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_config_matches_documented_values() {
        let config = PoolConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout, Duration::from_secs(10));
    }
}
