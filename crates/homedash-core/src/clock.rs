//! Wall-clock formatting for the dashboard header.

use chrono::{DateTime, Datelike, Local, Timelike};

/// Japanese weekday abbreviations, Sunday first.
pub const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Format a timestamp the way the dashboard clock shows it,
/// e.g. `2026年8月23日(日) 14:03:05`.
pub fn format_clock(now: DateTime<Local>) -> String {
    let weekday = WEEKDAYS_JA[now.weekday().num_days_from_sunday() as usize];
    format!(
        "{}年{}月{}日({}) {:02}:{:02}:{:02}",
        now.year(),
        now.month(),
        now.day(),
        weekday,
        now.hour(),
        now.minute(),
        now.second()
    )
}
