use crate::models::person::Person;
use serde::{Deserialize, Serialize};

/// A single work session, either entered manually or produced by the timer.
/// Field names follow the stored JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLog {
    pub id: String,
    pub person: Person,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub start: String,
    /// HH:MM
    pub end: String,
    /// Break length in minutes, excluded from worked time.
    #[serde(rename = "break", default)]
    pub break_min: i64,
    /// Net worked minutes.
    pub worked: i64,
    pub earnings: f64,
    /// Stored deduction; 0 means "recompute from earnings" for legacy rows.
    #[serde(default)]
    pub deduction: f64,
    pub activity: String,
    #[serde(default)]
    pub note: String,
}
