//! Wall-clock helpers for lesson times.
//!
//! Lesson times are stored as the user typed them ("HH:MM"). Anything that
//! does not parse is read as midnight so a malformed lesson sorts first and
//! is usually already in the past; no error ever leaves this module.

use chrono::NaiveTime;

/// Parse a "HH:MM" (or "HH:MM:SS") wall-clock string, falling back to 00:00.
pub fn parse_clock(value: &str) -> NaiveTime {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .unwrap_or(NaiveTime::MIN)
}

/// Format a number of seconds as `MM:SS`.
///
/// Minutes are not wrapped at 60, and negative values clamp to `00:00`.
pub fn format_countdown(total_secs: i64) -> String {
    if total_secs < 0 {
        return "00:00".to_string();
    }
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Countdown from `now` until the wall-clock time `target`.
pub fn remaining(target: &str, now: NaiveTime) -> String {
    let secs = parse_clock(target).signed_duration_since(now).num_seconds();
    format_countdown(secs)
}
