use chrono::{DateTime, Local, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

pub fn date_of(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// YYYY-MM prefix of an ISO date, used for monthly grouping. Restored data
/// is not re-validated, so a malformed date falls through unchanged instead
/// of slicing into a multibyte character.
pub fn month_of(iso_date: &str) -> &str {
    iso_date.get(..7).unwrap_or(iso_date)
}

/// Render an ISO date as D.M.YYYY for tables and exports.
pub fn display_date(iso_date: &str) -> String {
    match parse_date(iso_date) {
        Some(d) => d.format("%-d.%-m.%Y").to_string(),
        None => iso_date.to_string(),
    }
}
