//! Singleton documents stored in the `settings` collection, keyed by id.

use crate::models::person::Person;
use serde::{Deserialize, Serialize};

pub const RENT_SETTINGS_ID: &str = "rentSettings";
pub const TASK_CATEGORIES_ID: &str = "taskCategories";
pub const EXPENSE_CATEGORIES_ID: &str = "expenseCategories";
pub const TIMER_STATE_ID: &str = "timerState";

/// Which of the two category lists a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Task,
    Expense,
}

impl CategoryKind {
    pub fn settings_id(&self) -> &'static str {
        match self {
            CategoryKind::Task => TASK_CATEGORIES_ID,
            CategoryKind::Expense => EXPENSE_CATEGORIES_ID,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Task => "task",
            CategoryKind::Expense => "expense",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "task" => Some(CategoryKind::Task),
            "expense" => Some(CategoryKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentSettings {
    #[serde(default = "rent_id")]
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "first_day")]
    pub day: u32,
}

fn rent_id() -> String {
    RENT_SETTINGS_ID.to_string()
}

fn first_day() -> u32 {
    1
}

impl Default for RentSettings {
    fn default() -> Self {
        Self {
            id: rent_id(),
            amount: 0.0,
            day: first_day(),
        }
    }
}

/// An ordered list of category names, one document per kind.
/// Browser-era backups may omit the id; restore fills it back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl CategoryList {
    pub fn empty(kind: CategoryKind) -> Self {
        Self {
            id: kind.settings_id().to_string(),
            categories: Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Append a name if not already present. Returns true when added.
    pub fn register(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    /// Remove a name by exact match. Returns true when removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c != name);
        self.categories.len() != before
    }
}

/// Mutable payload of the timer, nested under `data` in the stored document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerData {
    #[serde(rename = "startTime", default)]
    pub start_time: Option<i64>,
    #[serde(rename = "pauseTime", default)]
    pub pause_time: Option<i64>,
    #[serde(rename = "isRunning", default)]
    pub is_running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    #[serde(default = "timer_id")]
    pub id: String,
    #[serde(default)]
    pub data: TimerData,
}

fn timer_id() -> String {
    TIMER_STATE_ID.to_string()
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            id: timer_id(),
            data: TimerData::default(),
        }
    }
}
