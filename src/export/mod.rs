// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
mod model;

pub use logic::ExportLogic;
pub use model::{DebtExport, FinanceExport, WorkLogExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export writer.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Which collection an export pulls from.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportTarget {
    Worklogs,
    Finances,
    Debts,
    Deductions,
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Worklogs => "worklogs",
            ExportTarget::Finances => "finances",
            ExportTarget::Debts => "debts",
            ExportTarget::Deductions => "deductions",
        }
    }
}
