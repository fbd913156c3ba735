// src/export/logic.rs

use crate::core::debt::DebtLogic;
use crate::core::finance::{FinanceFilter, FinanceLogic};
use crate::core::summary::SummaryLogic;
use crate::core::work::{WorkLogFilter, WorkLogLogic};
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DebtExport, FinanceExport, WorkLogExport};
use crate::export::{ExportFormat, ExportTarget};
use crate::models::person::Person;
use crate::store::engine::StorageEngine;
use crate::ui::messages::warning;
use serde::Serialize;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one collection to `file`.
    ///
    /// - `target`: worklogs | finances | debts | deductions
    /// - `format`: csv | json
    /// - `person`, `from`, `to`: optional filters (`from`/`to` are dates,
    ///   ignored for debts and deductions)
    pub fn export(
        engine: &mut StorageEngine,
        target: ExportTarget,
        format: ExportFormat,
        file: &str,
        person: Option<Person>,
        from: Option<String>,
        to: Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        match target {
            ExportTarget::Worklogs => {
                let filter = WorkLogFilter {
                    person,
                    from,
                    to,
                    activity: None,
                };
                let rows: Vec<WorkLogExport> = WorkLogLogic::list(engine, &filter)?
                    .iter()
                    .map(WorkLogExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Finances => {
                let filter = FinanceFilter {
                    kind: None,
                    person,
                    from,
                    to,
                };
                let rows: Vec<FinanceExport> = FinanceLogic::list(engine, &filter)?
                    .iter()
                    .map(FinanceExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Debts => {
                let rows: Vec<DebtExport> = DebtLogic::list(engine, person, false)?
                    .iter()
                    .map(DebtExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Deductions => {
                let rows = SummaryLogic::deductions(engine, person)?;
                write_rows(&rows, target, format, path)
            }
        }
    }
}

fn write_rows<T: Serialize>(
    rows: &[T],
    target: ExportTarget,
    format: ExportFormat,
    path: &Path,
) -> AppResult<()> {
    if rows.is_empty() {
        warning(format!("No {} found for the selected filter.", target.as_str()));
        return Ok(());
    }
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}
