//! Database operations for the `candidates` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `candidates` table.
///
/// `analysis` and `score` are written by later enrichment steps, never by
/// the scraper.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: Option<String>,
    pub github_url: String,
    pub linkedin_url: Option<String>,
    pub contributions: Option<i32>,
    pub last_scraped: DateTime<Utc>,
    pub analysis: Option<String>,
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the scraper knows when storing a candidate.
#[derive(Debug, Clone, Copy)]
pub struct NewCandidate<'a> {
    pub github_url: &'a str,
    pub name: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
    pub contributions: Option<i32>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a candidate or refreshes the existing row for its `github_url`.
///
/// On conflict the scrape-owned fields (`name`, `linkedin_url`,
/// `contributions`, `last_scraped`) are refreshed and `updated_at` is
/// touched explicitly; `analysis` and `score` are left untouched. `name`
/// and `linkedin_url` never regress to NULL from a sparse re-scrape.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_candidate(
    pool: &PgPool,
    candidate: &NewCandidate<'_>,
) -> Result<CandidateRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, CandidateRow>(
        "INSERT INTO candidates (public_id, name, github_url, linkedin_url, contributions) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (github_url) DO UPDATE SET \
             name          = COALESCE(EXCLUDED.name, candidates.name), \
             linkedin_url  = COALESCE(EXCLUDED.linkedin_url, candidates.linkedin_url), \
             contributions = EXCLUDED.contributions, \
             last_scraped  = NOW(), \
             updated_at    = NOW() \
         RETURNING id, public_id, name, github_url, linkedin_url, contributions, \
                   last_scraped, analysis, score, created_at, updated_at",
    )
    .bind(public_id)
    .bind(candidate.name)
    .bind(candidate.github_url)
    .bind(candidate.linkedin_url)
    .bind(candidate.contributions)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the candidate with the given profile URL, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_candidate_by_github_url(
    pool: &PgPool,
    github_url: &str,
) -> Result<Option<CandidateRow>, DbError> {
    let row = sqlx::query_as::<_, CandidateRow>(
        "SELECT id, public_id, name, github_url, linkedin_url, contributions, \
                last_scraped, analysis, score, created_at, updated_at \
         FROM candidates \
         WHERE github_url = $1",
    )
    .bind(github_url)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Total number of stored candidates.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_candidates(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
