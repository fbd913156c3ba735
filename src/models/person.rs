use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two tracked household members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    Maru,
    Marty,
}

impl Person {
    /// Stable lowercase code used in stored records and CLI arguments.
    pub fn code(&self) -> &'static str {
        match self {
            Person::Maru => "maru",
            Person::Marty => "marty",
        }
    }

    /// Human-readable name for tables and messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Person::Maru => "Maru",
            Person::Marty => "Marty",
        }
    }

    /// Parse a CLI/stored code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "maru" => Some(Person::Maru),
            "marty" => Some(Person::Marty),
            _ => None,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
