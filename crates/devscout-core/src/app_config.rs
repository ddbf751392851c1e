use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(format!("unrecognized environment '{other}'")),
        }
    }
}

/// Which qualifier set the user search sends to GitHub.
///
/// Two policies exist for bounding the account-creation date of search
/// results; neither has been confirmed as the intended final behavior,
/// so both are kept selectable via `DEVSCOUT_SEARCH_STRATEGY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Fixed creation-date window (`created:2020-01-01..2024-12-31`),
    /// sorted by repository count.
    FixedWindow,
    /// Accounts created strictly before the current session checkpoint,
    /// sorted by join date.
    BeforeCheckpoint,
}

impl SearchStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::FixedWindow => "fixed-window",
            SearchStrategy::BeforeCheckpoint => "before-checkpoint",
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed-window" => Ok(SearchStrategy::FixedWindow),
            "before-checkpoint" => Ok(SearchStrategy::BeforeCheckpoint),
            other => Err(format!("unrecognized strategy '{other}'")),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub github_token: String,
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub github_request_timeout_secs: u64,
    pub github_user_agent: String,
    pub search_per_page: u32,
    pub search_strategy: SearchStrategy,
    /// Cap on rate-limit retries per page request. `None` retries until
    /// the quota resets, however long that takes.
    pub rate_limit_max_retries: Option<u32>,
}

// Manual Debug so the token and connection string never reach the logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("github_token", &"[redacted]")
            .field("database_url", &"[redacted]")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "github_request_timeout_secs",
                &self.github_request_timeout_secs,
            )
            .field("github_user_agent", &self.github_user_agent)
            .field("search_per_page", &self.search_per_page)
            .field("search_strategy", &self.search_strategy)
            .field("rate_limit_max_retries", &self.rate_limit_max_retries)
            .finish()
    }
}
