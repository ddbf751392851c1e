//! HTTP client for the GitHub REST and GraphQL APIs.
//!
//! Wraps `reqwest` with token management and typed response
//! deserialization. Every method issues exactly one request; the only
//! retry in the system lives in [`crate::search::SearchFetcher`], which
//! reacts to the rate-limit signal surfaced here as
//! [`GithubError::RateLimited`].

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};

use crate::error::GithubError;
use crate::types::{Repo, SearchPage, UserDetail};

const DEFAULT_BASE_URL: &str = "https://api.github.com/";

const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// Client for the GitHub API.
///
/// Use [`GithubClient::new`] for production or
/// [`GithubClient::with_base_url`] to point at a mock server in tests;
/// the GraphQL endpoint is always derived from the same base.
pub struct GithubClient {
    client: Client,
    token: String,
    base_url: Url,
    graphql_url: Url,
}

impl GithubClient {
    /// Creates a new client pointed at the production GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GithubError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GithubError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join appends path
        // segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GithubError::InvalidUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;
        let graphql_url = base_url
            .join("graphql")
            .map_err(|e| GithubError::InvalidUrl {
                url: format!("{base_url}graphql"),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
            graphql_url,
        })
    }

    /// Issues one paginated `GET /search/users` request.
    ///
    /// A 403 is GitHub's quota-exhaustion signal on this endpoint and maps
    /// to [`GithubError::RateLimited`] with the reset epoch from the
    /// `X-RateLimit-Reset` header; callers decide whether to wait and
    /// re-issue. No retry happens here.
    ///
    /// # Errors
    ///
    /// - [`GithubError::RateLimited`] on HTTP 403.
    /// - [`GithubError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`GithubError::Http`] on network failure.
    /// - [`GithubError::Deserialize`] if the body is not a search page.
    pub async fn search_users(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, GithubError> {
        let mut url = self.join("search/users")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            let reset_epoch = response
                .headers()
                .get(RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<i64>().ok());
            return Err(GithubError::RateLimited {
                url: url.to_string(),
                reset_epoch,
            });
        }
        if !status.is_success() {
            return Err(GithubError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GithubError::Deserialize {
            context: format!("search page {page} (per_page={per_page})"),
            source: e,
        })
    }

    /// Fetches the full record for one account, including its creation
    /// timestamp. Pure request/response; a non-success status fails
    /// immediately.
    ///
    /// # Errors
    ///
    /// - [`GithubError::UnexpectedStatus`] on any non-2xx status.
    /// - [`GithubError::Http`] on network failure.
    /// - [`GithubError::Deserialize`] if the body is not a user record.
    pub async fn get_user(&self, login: &str) -> Result<UserDetail, GithubError> {
        let url = self.join(&format!("users/{login}"))?;
        self.get_json(url, &format!("user detail for {login}")).await
    }

    /// Fetches the account's repository list.
    ///
    /// # Errors
    ///
    /// - [`GithubError::UnexpectedStatus`] on any non-2xx status.
    /// - [`GithubError::Http`] on network failure.
    /// - [`GithubError::Deserialize`] if the body is not a repo array.
    pub async fn list_repos(&self, login: &str) -> Result<Vec<Repo>, GithubError> {
        let url = self.join(&format!("users/{login}/repos"))?;
        self.get_json(url, &format!("repo list for {login}")).await
    }

    pub(crate) fn graphql_url(&self) -> &Url {
        &self.graphql_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn bearer_token(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn join(&self, path: &str) -> Result<Url, GithubError> {
        self.base_url.join(path).map_err(|e| GithubError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }

    /// Sends a GET request with REST headers, asserts a 2xx status, and
    /// parses the body as JSON.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, GithubError> {
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
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
        serde_json::from_str(&body).map_err(|e| GithubError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GithubClient {
        GithubClient::with_base_url("test-token", 30, "devscout-tests", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn join_appends_path_segments() {
        let client = test_client("https://api.github.com");
        let url = client.join("users/alice").expect("join should succeed");
        assert_eq!(url.as_str(), "https://api.github.com/users/alice");
    }

    #[test]
    fn join_handles_trailing_slash_on_base() {
        let client = test_client("https://api.github.com/");
        let url = client
            .join("users/alice/repos")
            .expect("join should succeed");
        assert_eq!(url.as_str(), "https://api.github.com/users/alice/repos");
    }

    #[test]
    fn graphql_url_derives_from_base() {
        let client = test_client("http://127.0.0.1:9999");
        assert_eq!(client.graphql_url().as_str(), "http://127.0.0.1:9999/graphql");
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let result = GithubClient::with_base_url("t", 30, "ua", "not a url");
        assert!(matches!(result, Err(GithubError::InvalidUrl { .. })));
    }
}
