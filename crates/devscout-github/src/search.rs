//! The paginated, rate-limited, checkpointed user search.
//!
//! One [`SearchFetcher::fetch_page`] call covers one search page:
//!
//! ```text
//! build query -> request -> [403] -> wait for reset -> request (retry)
//!                        -> [other error] -> failed
//!                        -> [success, empty] -> done, no session write
//!                        -> [success, non-empty]
//!                             -> fetch last item's detail
//!                             -> append session row
//!                             -> filter items -> done
//! ```
//!
//! Pagination across pages is the caller's job. Re-invoking a page
//! re-issues the network requests and appends another session row; the
//! fetch is not restartable.

use chrono::{DateTime, TimeZone, Utc};
use devscout_core::{SearchStrategy, SessionStore};

use crate::client::GithubClient;
use crate::error::GithubError;
use crate::query::build_query;
use crate::rate_limit::reset_delay;
use crate::types::{AccountSummary, SearchPage};

/// Result of one page fetch: the accounts that passed the filter, plus
/// how many the page held before filtering (so callers can tell an
/// exhausted search from a fully-filtered page).
#[derive(Debug)]
pub struct FetchedPage {
    pub accepted: Vec<AccountSummary>,
    pub fetched: usize,
}

/// Drives the search loop against an injected client and session store.
pub struct SearchFetcher<'a, S> {
    client: &'a GithubClient,
    sessions: &'a S,
    strategy: SearchStrategy,
    /// `None` waits out rate limits forever. A persistently rejected
    /// credential then loops indefinitely, so deployments can cap it
    /// via configuration.
    rate_limit_max_retries: Option<u32>,
}

impl<'a, S: SessionStore> SearchFetcher<'a, S> {
    pub fn new(client: &'a GithubClient, sessions: &'a S, strategy: SearchStrategy) -> Self {
        Self {
            client,
            sessions,
            strategy,
            rate_limit_max_retries: None,
        }
    }

    /// Caps how many rate-limit waits a single page request tolerates.
    #[must_use]
    pub fn with_rate_limit_ceiling(mut self, max_retries: Option<u32>) -> Self {
        self.rate_limit_max_retries = max_retries;
        self
    }

    /// Fetches one page of matching accounts, filtered.
    ///
    /// On a non-empty page this always fetches the full detail of the
    /// *last* item (search items carry no creation date) and appends
    /// exactly one session row stamped with that timestamp and the page's
    /// pre-filter item count, independent of how many items pass the
    /// filter. An empty page writes nothing.
    ///
    /// # Errors
    ///
    /// - [`GithubError::Session`] if the session store fails.
    /// - [`GithubError::RateLimitRetriesExhausted`] if a configured
    ///   ceiling is hit while waiting out 403s.
    /// - Any other [`GithubError`] from the search, detail, or filter
    ///   requests propagates immediately; no partial page is salvaged.
    pub async fn fetch_page(&self, page: u32, per_page: u32) -> Result<FetchedPage, GithubError> {
        let checkpoint = self
            .sessions
            .last_created_at()
            .await
            .map_err(|e| GithubError::Session(Box::new(e)))?
            .unwrap_or_else(default_checkpoint);

        let query = build_query(self.strategy, checkpoint);
        tracing::debug!(page, per_page, query = %query, "requesting search page");

        let search_page = self.search_waiting_out_rate_limits(&query, page, per_page).await?;
        let items = search_page.items;
        let fetched = items.len();

        let Some(last_item) = items.last() else {
            tracing::debug!(page, "search page empty; checkpoint unchanged");
            return Ok(FetchedPage {
                accepted: Vec::new(),
                fetched: 0,
            });
        };

        // Search items carry no creation date; resolve the last item for
        // the precise timestamp before recording the session.
        let last_detail = self.client.get_user(&last_item.login).await?;
        self.sessions
            .record_page(last_detail.created_at, page_item_count(fetched))
            .await
            .map_err(|e| GithubError::Session(Box::new(e)))?;
        tracing::info!(
            page,
            profiles_scraped = fetched,
            last_created_at = %last_detail.created_at,
            "recorded scrape session"
        );

        let mut accepted = Vec::with_capacity(fetched);
        for item in items {
            if self.client.meets_criteria(&item.login).await? {
                accepted.push(item);
            } else {
                tracing::debug!(login = %item.login, "account below acceptance thresholds");
            }
        }

        Ok(FetchedPage { accepted, fetched })
    }

    /// Issues the search request, sleeping through 403 rate-limit signals
    /// and re-issuing the identical request once the quota resets.
    ///
    /// An explicit loop rather than self-recursion, so pathological
    /// rate-limit storms cannot grow the call stack.
    async fn search_waiting_out_rate_limits(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, GithubError> {
        let mut waits = 0u32;
        loop {
            match self.client.search_users(query, page, per_page).await {
                Ok(search_page) => return Ok(search_page),
                Err(GithubError::RateLimited { reset_epoch, .. }) => {
                    if let Some(max) = self.rate_limit_max_retries {
                        if waits >= max {
                            return Err(GithubError::RateLimitRetriesExhausted { retries: max });
                        }
                    }
                    waits += 1;
                    let delay = reset_delay(reset_epoch, Utc::now());
                    tracing::warn!(
                        page,
                        wait_secs = delay.as_secs(),
                        waits,
                        "search rate limited; sleeping until quota reset"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(other) => return Err(other),
            }
        }
    }
}

/// Checkpoint used before any session row exists.
fn default_checkpoint() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0)
        .single()
        .expect("valid constant timestamp")
}

fn page_item_count(fetched: usize) -> i32 {
    i32::try_from(fetched).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checkpoint_is_the_2018_epoch() {
        assert_eq!(
            default_checkpoint().to_rfc3339(),
            "2018-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn page_item_count_saturates() {
        assert_eq!(page_item_count(50), 50);
        assert_eq!(page_item_count(usize::MAX), i32::MAX);
    }
}
