//! Search query construction.
//!
//! The user search sends a free-text query of space-joined qualifier
//! tokens. The demographic and activity constraints are fixed; only the
//! account-creation bound varies, and two policies for it exist side by
//! side as [`SearchStrategy`] variants (see DESIGN.md).

use chrono::{DateTime, Utc};
use devscout_core::SearchStrategy;

const BASE_QUALIFIERS: [&str; 4] = ["type:user", "followers:<50", "location:Italy", "repos:>2"];

const FIXED_CREATION_WINDOW: &str = "created:2020-01-01..2024-12-31";

/// Builds the search query for one page request.
///
/// `checkpoint` is the current session checkpoint (or the epoch default);
/// only [`SearchStrategy::BeforeCheckpoint`] consumes it. Building a
/// query from an unchanged checkpoint is deterministic.
#[must_use]
pub fn build_query(strategy: SearchStrategy, checkpoint: DateTime<Utc>) -> String {
    let mut tokens: Vec<String> = BASE_QUALIFIERS.iter().map(|t| (*t).to_string()).collect();
    match strategy {
        SearchStrategy::FixedWindow => {
            tokens.push(FIXED_CREATION_WINDOW.to_string());
            tokens.push("sort:repositories-desc".to_string());
        }
        SearchStrategy::BeforeCheckpoint => {
            tokens.push(format!("created:<{}", checkpoint.format("%Y-%m-%d")));
            tokens.push("sort:joined-desc".to_string());
        }
    }
    tokens.join(" ")
}
