//! Candidate acceptance criteria.
//!
//! An account qualifies when it has enough repositories of its own and
//! enough recent contribution activity. Both thresholds are fixed; they
//! define what "candidate" means rather than being tuning knobs.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::json;

use crate::client::GithubClient;
use crate::error::GithubError;
use crate::types::ContributionsResponse;

/// Minimum number of non-forked repositories.
pub const MIN_SOURCE_REPOS: usize = 3;

/// Minimum aggregate contribution count over the API's recent activity
/// window.
pub const MIN_CONTRIBUTIONS: i64 = 800;

const CONTRIBUTIONS_QUERY: &str = "\
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      restrictedContributionsCount
    }
  }
}";

impl GithubClient {
    /// Decides whether an account meets the candidate acceptance criteria:
    /// at least [`MIN_SOURCE_REPOS`] non-forked repositories and at least
    /// [`MIN_CONTRIBUTIONS`] aggregate contributions.
    ///
    /// Both sub-requests are always issued; a transport or HTTP failure on
    /// either one propagates and aborts the caller's iteration. A
    /// contribution payload with missing fields counts as zero instead
    /// (see [`GithubClient::contribution_count`]).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the repository list or contribution
    /// query fails at the transport or HTTP level.
    pub async fn meets_criteria(&self, login: &str) -> Result<bool, GithubError> {
        let repos = self.list_repos(login).await?;
        let source_repos = repos.iter().filter(|repo| !repo.fork).count();

        let contributions = self.contribution_count(login).await?;

        Ok(contributions >= MIN_CONTRIBUTIONS && source_repos >= MIN_SOURCE_REPOS)
    }

    /// Fetches the aggregate contribution count for an account: the sum of
    /// commit, issue, pull-request, review, and restricted contributions
    /// over the API's recent activity window.
    ///
    /// A response that is valid JSON but missing expected fields (or with
    /// a null user) logs a warning and counts as `0`; the account simply
    /// fails the threshold. A body that is not JSON at all is an error.
    ///
    /// # Errors
    ///
    /// - [`GithubError::UnexpectedStatus`] on any non-2xx status.
    /// - [`GithubError::Http`] on network failure.
    /// - [`GithubError::Deserialize`] if the body is not valid JSON.
    pub async fn contribution_count(&self, login: &str) -> Result<i64, GithubError> {
        let url = self.graphql_url().clone();
        let response = self
            .http()
            .post(url.clone())
            .header(AUTHORIZATION, self.bearer_token())
            .header(ACCEPT, "application/json")
            .json(&json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "login": login },
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GithubError::Deserialize {
                context: format!("contributions for {login}"),
                source: e,
            })?;

        // Missing fields fail the candidate, not the scrape. Kept as an
        // explicit logged fallback so tests can assert on it.
        match serde_json::from_value::<ContributionsResponse>(value) {
            Ok(parsed) => match parsed.data.user {
                Some(user) => Ok(user.contributions_collection.total()),
                None => {
                    tracing::warn!(login = %login, "contribution query resolved no user; counting 0");
                    Ok(0)
                }
            },
            Err(e) => {
                tracing::warn!(
                    login = %login,
                    error = %e,
                    "contribution payload missing expected fields; counting 0"
                );
                Ok(0)
            }
        }
    }
}
