//! Fixed household rate table and the derived-value arithmetic.
//! Downstream totals depend on these exact values, so they are not
//! configurable.

use crate::models::person::Person;

/// Hourly rate in CZK.
pub fn hourly_rate(person: Person) -> f64 {
    match person {
        Person::Maru => 275.0,
        Person::Marty => 400.0,
    }
}

/// Mandatory deduction as a fraction of earnings.
pub fn deduction_rate(person: Person) -> f64 {
    match person {
        Person::Maru => 1.0 / 3.0,
        Person::Marty => 0.5,
    }
}

pub fn earnings_for(minutes: i64, person: Person) -> f64 {
    minutes as f64 / 60.0 * hourly_rate(person)
}

pub fn deduction_for(earnings: f64, person: Person) -> f64 {
    earnings * deduction_rate(person)
}

/// Elapsed working time of a timer in milliseconds: running time counts up to
/// `now`, paused time is frozen at the pause instant, idle time is zero.
pub fn elapsed_ms(
    start_time: Option<i64>,
    pause_time: Option<i64>,
    is_running: bool,
    now_ms: i64,
) -> i64 {
    let Some(start) = start_time else {
        return 0;
    };
    if is_running {
        now_ms - start
    } else if let Some(pause) = pause_time {
        pause - start
    } else {
        0
    }
}

/// Milliseconds rounded to whole minutes, matching the stored `worked` field.
pub fn ms_to_minutes(ms: i64) -> i64 {
    (ms as f64 / 60_000.0).round() as i64
}
