use thiserror::Error;

/// Errors returned by the GitHub API client and search fetcher.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search endpoint answered 403, signaling quota exhaustion.
    /// `reset_epoch` carries the `X-RateLimit-Reset` header when present.
    #[error("GitHub rate limit exhausted for {url}")]
    RateLimited {
        url: String,
        reset_epoch: Option<i64>,
    },

    /// A configured retry ceiling was hit while waiting out rate limits.
    #[error("gave up after {retries} rate-limit retries")]
    RateLimitRetriesExhausted { retries: u32 },

    /// Any non-2xx status other than a search rate-limit signal.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A URL could not be constructed from the configured base.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The session store failed while reading or advancing the checkpoint.
    #[error("session store error: {0}")]
    Session(#[source] Box<dyn std::error::Error + Send + Sync>),
}
