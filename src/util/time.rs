//! Cache freshness calculations.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Whether a subscription is due for another call.
///
/// A subscription that never ran is always due. Otherwise it becomes due once
/// `cache_duration` has fully elapsed since `last_execution`, i.e. at `now >= last + cache`.
///
/// # Arguments
/// - `last_execution` - Time of the last successful call, stored as naive UTC
/// - `cache_duration` - How long the endpoint's response stays fresh
/// - `now` - Reference time of the current pass
pub fn is_due(
    last_execution: Option<NaiveDateTime>,
    cache_duration: Duration,
    now: DateTime<Utc>,
) -> bool {
    match last_execution {
        None => true,
        Some(last) => now.naive_utc() - last >= cache_duration,
    }
}
