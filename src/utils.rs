//! Utility functions for the exporter

use chrono::{Local, NaiveTime, TimeZone};
use std::time::Duration;

/// Canonicalize a player identifier by stripping separator characters.
///
/// The remote identity service keys profiles by the undashed UUID form.
pub fn canonicalize_identifier(id: &str) -> String {
    id.chars().filter(|c| *c != '-').collect()
}

/// Time remaining until the next local occurrence of `hour:minute`.
pub fn until_next_daily(hour: u32, minute: u32) -> Duration {
    let now = Local::now();
    let target_time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid wall-clock time");
    let mut target = now.date_naive().and_time(target_time);
    if target <= now.naive_local() {
        target += chrono::Duration::days(1);
    }
    let delta = Local
        .from_local_datetime(&target)
        .earliest()
        .map(|t| t - now)
        .unwrap_or_else(|| chrono::Duration::days(1));
    delta.to_std().unwrap_or(Duration::from_secs(24 * 60 * 60))
}
