//! Live tests against a real Postgres via `#[sqlx::test]`; the harness
//! creates a fresh database per test and applies the workspace
//! migrations (the path is relative to this crate's root).

use chrono::{TimeZone, Utc};
use devscout_core::SessionStore;
use devscout_db::{
    count_candidates, create_session, get_candidate_by_github_url, latest_session,
    upsert_candidate, NewCandidate, PgSessionStore,
};

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_candidate_inserts_then_refreshes(pool: sqlx::PgPool) {
    let inserted = upsert_candidate(
        &pool,
        &NewCandidate {
            github_url: "https://github.com/alice",
            name: Some("Alice Rossi"),
            linkedin_url: None,
            contributions: Some(900),
        },
    )
    .await
    .expect("insert should succeed");

    assert_eq!(inserted.name.as_deref(), Some("Alice Rossi"));
    assert_eq!(inserted.contributions, Some(900));

    // Re-scrape with a sparser payload: contributions refresh, the stored
    // name survives, and the row is touched rather than duplicated.
    let refreshed = upsert_candidate(
        &pool,
        &NewCandidate {
            github_url: "https://github.com/alice",
            name: None,
            linkedin_url: Some("https://linkedin.com/in/alice"),
            contributions: Some(950),
        },
    )
    .await
    .expect("upsert should succeed");

    assert_eq!(refreshed.id, inserted.id);
    assert_eq!(refreshed.name.as_deref(), Some("Alice Rossi"));
    assert_eq!(
        refreshed.linkedin_url.as_deref(),
        Some("https://linkedin.com/in/alice")
    );
    assert_eq!(refreshed.contributions, Some(950));
    assert!(refreshed.updated_at >= inserted.updated_at);

    let total = count_candidates(&pool).await.expect("count should succeed");
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_candidate_by_github_url_returns_none_when_absent(pool: sqlx::PgPool) {
    let found = get_candidate_by_github_url(&pool, "https://github.com/nobody")
        .await
        .expect("query should succeed");
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn latest_session_returns_max_last_created_at(pool: sqlx::PgPool) {
    let early = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).single().unwrap();
    let late = Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).single().unwrap();
    let middle = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).single().unwrap();

    create_session(&pool, early, 50).await.expect("insert");
    create_session(&pool, late, 50).await.expect("insert");
    create_session(&pool, middle, 25).await.expect("insert");

    let latest = latest_session(&pool)
        .await
        .expect("query should succeed")
        .expect("sessions exist");
    assert_eq!(latest.last_created_at, late);
    assert_eq!(latest.profiles_scraped, 50);
}

#[sqlx::test(migrations = "../../migrations")]
async fn pg_session_store_reads_and_appends(pool: sqlx::PgPool) {
    let store = PgSessionStore::new(pool.clone());

    let checkpoint = store
        .last_created_at()
        .await
        .expect("read should succeed");
    assert!(checkpoint.is_none());

    let stamp = Utc.with_ymd_and_hms(2021, 5, 6, 7, 8, 9).single().unwrap();
    store
        .record_page(stamp, 2)
        .await
        .expect("append should succeed");

    let checkpoint = store
        .last_created_at()
        .await
        .expect("read should succeed");
    assert_eq!(checkpoint, Some(stamp));

    let row = latest_session(&pool)
        .await
        .expect("query should succeed")
        .expect("session exists");
    assert_eq!(row.profiles_scraped, 2);
}
