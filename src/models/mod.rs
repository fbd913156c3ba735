pub mod debt;
pub mod finance;
pub mod person;
pub mod settings;
pub mod snapshot;
pub mod work_log;

/// Currency used when a record does not specify one.
pub const DEFAULT_CURRENCY: &str = "CZK";

pub(crate) fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
