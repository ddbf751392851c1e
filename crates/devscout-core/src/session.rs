//! The session seam between the search fetcher and durable storage.
//!
//! A session row is a scrape checkpoint: the creation date of the last
//! account seen in a fetched page, plus how many profiles that page held.
//! The fetcher consumes the latest checkpoint to bound its next query and
//! appends a new one after every non-empty page. Keeping the store behind
//! a trait lets tests drive the fetcher with an in-memory implementation.

use std::future::Future;

use chrono::{DateTime, Utc};

/// Durable store of scrape sessions (checkpoints).
///
/// Implementations must be append-only: `record_page` adds a new session
/// row and never rewrites an existing one.
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creation date of the last account processed across all sessions,
    /// i.e. the maximum `last_created_at` on record. `None` when no
    /// session has been written yet.
    fn last_created_at(
        &self,
    ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send;

    /// Append one session row for a fetched page.
    fn record_page(
        &self,
        last_created_at: DateTime<Utc>,
        profiles_scraped: i32,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
