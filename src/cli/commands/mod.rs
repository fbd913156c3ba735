pub mod add;
pub mod backup;
pub mod category;
pub mod config;
pub mod debt;
pub mod del;
pub mod edit;
pub mod export;
pub mod finance;
pub mod init;
pub mod list;
pub mod log;
pub mod payment;
pub mod rent;
pub mod restore;
pub mod summary;
pub mod timer;

use crate::config::Config;
use crate::core::events::{DomainEvent, EventBus};
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::ui::messages::info;
use crate::utils::date;

/// Resolve a person argument, falling back to the configured default.
pub(crate) fn resolve_person(arg: Option<&str>, cfg: &Config) -> AppResult<Person> {
    let code = match arg {
        Some(code) => code.to_string(),
        None => cfg.default_person.clone().ok_or_else(|| {
            AppError::InvalidPerson(
                "no person given and no default_person configured".to_string(),
            )
        })?,
    };
    Person::from_code(&code).ok_or(AppError::InvalidPerson(code))
}

/// Parse an optional person filter without applying any default.
pub(crate) fn parse_person_filter(arg: Option<&str>) -> AppResult<Option<Person>> {
    match arg {
        Some(code) => Person::from_code(code)
            .map(Some)
            .ok_or_else(|| AppError::InvalidPerson(code.to_string())),
        None => Ok(None),
    }
}

/// Validate an optional date argument, falling back to today.
pub(crate) fn resolve_date(arg: Option<&str>) -> AppResult<String> {
    match arg {
        Some(d) if date::parse_date(d).is_some() => Ok(d.to_string()),
        Some(d) => Err(AppError::InvalidDate(d.to_string())),
        None => Ok(date::today_string()),
    }
}

/// Event bus used by every handler: echoes category registrations so
/// implicit additions are visible on the terminal.
pub(crate) fn standard_bus() -> EventBus {
    let mut bus = EventBus::new();
    bus.subscribe(|event| {
        if let DomainEvent::CategoryRegistered { kind, name } = event {
            info(format!("New {} category registered: '{}'", kind.label(), name));
        }
    });
    bus
}
