//! Database operations for the `sessions` table (scrape checkpoints).
//!
//! Sessions are append-only: one row per non-empty search page, never
//! updated in place. The current checkpoint is the row with the maximum
//! `last_created_at`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `sessions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    pub id: i64,
    /// Creation date of the last account in the fetched page.
    pub last_created_at: DateTime<Utc>,
    /// How many profiles the page held before filtering.
    pub profiles_scraped: i32,
    pub created_at: DateTime<Utc>,
}

/// Appends one session row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_session(
    pool: &PgPool,
    last_created_at: DateTime<Utc>,
    profiles_scraped: i32,
) -> Result<SessionRow, DbError> {
    let row = sqlx::query_as::<_, SessionRow>(
        "INSERT INTO sessions (last_created_at, profiles_scraped) \
         VALUES ($1, $2) \
         RETURNING id, last_created_at, profiles_scraped, created_at",
    )
    .bind(last_created_at)
    .bind(profiles_scraped)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the current checkpoint: the session with the maximum
/// `last_created_at`, or `None` when no session has been written yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_session(pool: &PgPool) -> Result<Option<SessionRow>, DbError> {
    let row = sqlx::query_as::<_, SessionRow>(
        "SELECT id, last_created_at, profiles_scraped, created_at \
         FROM sessions \
         ORDER BY last_created_at DESC, id DESC \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Postgres-backed implementation of the session seam consumed by the
/// search fetcher.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl devscout_core::SessionStore for PgSessionStore {
    type Error = DbError;

    async fn last_created_at(&self) -> Result<Option<DateTime<Utc>>, DbError> {
        let session = latest_session(&self.pool).await?;
        Ok(session.map(|row| row.last_created_at))
    }

    async fn record_page(
        &self,
        last_created_at: DateTime<Utc>,
        profiles_scraped: i32,
    ) -> Result<(), DbError> {
        create_session(&self.pool, last_created_at, profiles_scraped).await?;
        Ok(())
    }
}
