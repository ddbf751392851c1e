//! GitHub API response types.
//!
//! REST payloads are deserialized into the minimal shapes the scraper
//! consumes; unknown fields are ignored. The GraphQL contribution types
//! make every counter required: a payload missing any of them is handled
//! as a whole by the caller, not patched per field.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page from `GET /search/users`.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<AccountSummary>,
}

/// An account as returned by the search endpoint.
///
/// Search items carry no creation date; the fetcher resolves the last
/// item through [`crate::GithubClient::get_user`] to stamp its session.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSummary {
    pub login: String,
    pub html_url: String,
}

/// Full account record from `GET /users/{login}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetail {
    pub login: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A repository as returned by `GET /users/{login}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    pub fork: bool,
}

// ---------------------------------------------------------------------------
// GraphQL contribution aggregation
// ---------------------------------------------------------------------------

/// Envelope of the contributions GraphQL query: `{ "data": { "user": ... } }`.
///
/// `user` is `null` for logins the API cannot resolve.
#[derive(Debug, Deserialize)]
pub(crate) struct ContributionsResponse {
    pub data: ContributionsData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContributionsData {
    pub user: Option<ContributionsUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributionsUser {
    pub contributions_collection: ContributionCounters,
}

/// The five sub-counters summed into the aggregate contribution count.
/// All fields are required: one missing counter voids the whole payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributionCounters {
    pub total_commit_contributions: i64,
    pub total_issue_contributions: i64,
    pub total_pull_request_contributions: i64,
    pub total_pull_request_review_contributions: i64,
    pub restricted_contributions_count: i64,
}

impl ContributionCounters {
    /// Sum of all five sub-counters.
    pub(crate) fn total(&self) -> i64 {
        self.total_commit_contributions
            + self.total_issue_contributions
            + self.total_pull_request_contributions
            + self.total_pull_request_review_contributions
            + self.restricted_contributions_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_total_sums_all_five() {
        let counters = ContributionCounters {
            total_commit_contributions: 500,
            total_issue_contributions: 100,
            total_pull_request_contributions: 150,
            total_pull_request_review_contributions: 100,
            restricted_contributions_count: 50,
        };
        assert_eq!(counters.total(), 900);
    }

    #[test]
    fn counters_reject_missing_sub_counter() {
        // restrictedContributionsCount absent: the payload must not parse.
        let payload = serde_json::json!({
            "totalCommitContributions": 500,
            "totalIssueContributions": 100,
            "totalPullRequestContributions": 150,
            "totalPullRequestReviewContributions": 100
        });
        assert!(serde_json::from_value::<ContributionCounters>(payload).is_err());
    }

    #[test]
    fn search_page_parses_without_counts() {
        let payload = serde_json::json!({
            "items": [
                { "login": "alice", "html_url": "https://github.com/alice" }
            ]
        });
        let page: SearchPage = serde_json::from_value(payload).expect("page should parse");
        assert_eq!(page.total_count, 0);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].login, "alice");
    }
}
