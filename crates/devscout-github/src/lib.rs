pub mod client;
pub mod error;
pub mod filter;
pub mod query;
pub mod rate_limit;
pub mod search;
pub mod types;

pub use client::GithubClient;
pub use error::GithubError;
pub use search::{FetchedPage, SearchFetcher};
pub use types::{AccountSummary, Repo, SearchPage, UserDetail};
