//! Time utilities: HH:MM validation and parsing, minute arithmetic, clock formatting.

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap());

/// Accepts H:MM and HH:MM wall-clock times (00:00 to 23:59).
pub fn is_valid_time(t: &str) -> bool {
    TIME_RE.is_match(t)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    if !is_valid_time(t) {
        return None;
    }
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Elapsed milliseconds rendered as H:MM:SS for the timer display.
pub fn format_hms(ms: i64) -> String {
    let total_secs = (ms.max(0)) / 1000;
    format!(
        "{}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

pub fn hhmm_of(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

/// Local wall-clock HH:MM of an epoch-milliseconds instant.
pub fn local_hhmm(ms: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
}
