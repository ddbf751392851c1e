//! The scrape command: drive the paginated search and persist candidates.
//!
//! Strictly sequential: one request in flight at a time. A fatal error
//! anywhere aborts the invocation; sessions already written stay durable,
//! so the next run resumes from the last recorded checkpoint.

use devscout_core::AppConfig;
use devscout_db::{NewCandidate, PgSessionStore, PoolConfig};
use devscout_github::{GithubClient, SearchFetcher};

/// Fetch search pages until `count` accepted profiles have been stored or
/// the search comes back empty.
pub async fn run(config: &AppConfig, count: usize) -> anyhow::Result<()> {
    let pool_config = PoolConfig::from_app_config(config);
    let pool = devscout_db::connect_pool(&config.database_url, pool_config).await?;
    devscout_db::run_migrations(&pool).await?;

    let client = GithubClient::new(
        &config.github_token,
        config.github_request_timeout_secs,
        &config.github_user_agent,
    )?;
    let sessions = PgSessionStore::new(pool.clone());
    let fetcher = SearchFetcher::new(&client, &sessions, config.search_strategy)
        .with_rate_limit_ceiling(config.rate_limit_max_retries);

    tracing::info!(count, strategy = %config.search_strategy, "starting scrape");

    let mut stored = 0usize;
    let mut page: u32 = 1;

    'pages: while stored < count {
        let fetched = fetcher.fetch_page(page, config.search_per_page).await?;
        if fetched.fetched == 0 {
            tracing::info!(page, stored, "search exhausted before reaching the requested count");
            break;
        }
        tracing::info!(
            page,
            fetched = fetched.fetched,
            accepted = fetched.accepted.len(),
            "fetched search page"
        );

        for account in fetched.accepted {
            let detail = client.get_user(&account.login).await?;
            let contributions = client.contribution_count(&account.login).await?;
            let row = devscout_db::upsert_candidate(
                &pool,
                &NewCandidate {
                    github_url: &detail.html_url,
                    name: detail.name.as_deref(),
                    linkedin_url: None,
                    contributions: Some(clamp_contributions(contributions)),
                },
            )
            .await?;
            stored += 1;
            tracing::info!(login = %account.login, candidate_id = row.id, stored, "stored candidate");
            if stored >= count {
                break 'pages;
            }
        }
        page += 1;
    }

    println!("stored {stored} candidate(s)");
    Ok(())
}

fn clamp_contributions(total: i64) -> i32 {
    i32::try_from(total).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_contributions_saturates() {
        assert_eq!(clamp_contributions(900), 900);
        assert_eq!(clamp_contributions(i64::from(i32::MAX) + 1), i32::MAX);
    }
}
