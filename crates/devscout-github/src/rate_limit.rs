//! Rate-limit wait computation for the search fetcher.
//!
//! GitHub's search quota answers 403 with an `X-RateLimit-Reset` header
//! holding the epoch second at which the quota refills. The fetcher
//! sleeps until that instant plus a one-second safety margin, then
//! re-issues the identical request.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Extra sleep added on top of the reset wait so the first retry does
/// not land on the exact refill second and trip the limiter again.
pub const RESET_SAFETY_MARGIN: Duration = Duration::from_secs(1);

/// Computes how long to sleep before retrying a rate-limited request.
///
/// The wait until `reset_epoch` is clamped to non-negative (a reset in
/// the past, or a missing/unparsable header, waits only the margin), and
/// [`RESET_SAFETY_MARGIN`] is always added.
#[must_use]
pub fn reset_delay(reset_epoch: Option<i64>, now: DateTime<Utc>) -> Duration {
    let until_reset = reset_epoch
        .map_or(0, |epoch| epoch.saturating_sub(now.timestamp()))
        .max(0);
    let until_reset = u64::try_from(until_reset).unwrap_or(0);
    Duration::from_secs(until_reset) + RESET_SAFETY_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid test timestamp")
    }

    #[test]
    fn waits_until_reset_plus_margin() {
        let delay = reset_delay(Some(now().timestamp() + 5), now());
        assert_eq!(delay, Duration::from_secs(6));
    }

    #[test]
    fn reset_in_the_past_waits_only_the_margin() {
        let delay = reset_delay(Some(now().timestamp() - 120), now());
        assert_eq!(delay, Duration::from_secs(1));
    }

    #[test]
    fn reset_exactly_now_waits_only_the_margin() {
        let delay = reset_delay(Some(now().timestamp()), now());
        assert_eq!(delay, Duration::from_secs(1));
    }

    #[test]
    fn missing_header_waits_only_the_margin() {
        let delay = reset_delay(None, now());
        assert_eq!(delay, Duration::from_secs(1));
    }
}
