//! Full-store backup file shape.

use crate::models::debt::Debt;
use crate::models::finance::FinanceRecord;
use crate::models::settings::{CategoryKind, CategoryList, RentSettings, TimerState};
use crate::models::work_log::WorkLog;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsBundle {
    #[serde(rename = "rentSettings", default)]
    pub rent_settings: RentSettings,
    #[serde(rename = "taskCategories", default = "empty_task_list")]
    pub task_categories: CategoryList,
    #[serde(rename = "expenseCategories", default = "empty_expense_list")]
    pub expense_categories: CategoryList,
    #[serde(rename = "timerState", default)]
    pub timer_state: TimerState,
}

fn empty_task_list() -> CategoryList {
    CategoryList::empty(CategoryKind::Task)
}

fn empty_expense_list() -> CategoryList {
    CategoryList::empty(CategoryKind::Expense)
}

impl Default for SettingsBundle {
    fn default() -> Self {
        Self {
            rent_settings: RentSettings::default(),
            task_categories: empty_task_list(),
            expense_categories: empty_expense_list(),
            timer_state: TimerState::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(rename = "workLogs", default)]
    pub work_logs: Vec<WorkLog>,
    #[serde(default)]
    pub finances: Vec<FinanceRecord>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub settings: SettingsBundle,
}

/// `data` is deliberately not defaulted: a backup without it must be
/// rejected. Everything else is tolerated when absent, so hand-edited or
/// older backup files still restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unix epoch milliseconds at backup time.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default = "snapshot_version")]
    pub version: u32,
    pub data: SnapshotData,
}

fn snapshot_version() -> u32 {
    SNAPSHOT_VERSION
}
