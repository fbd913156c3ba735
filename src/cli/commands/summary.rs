use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::SummaryLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{header, info};
use crate::utils::{formatting, table::Table};

use super::parse_person_filter;

/// Monthly earnings and deduction summary.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { person } = cmd {
        let mut engine = StorageEngine::open(cfg)?;

        let rows =
            SummaryLogic::deductions(&mut engine, parse_person_filter(person.as_deref())?)?;

        if rows.is_empty() {
            info("No work logs to summarize.");
            return Ok(());
        }

        header("Monthly summary");

        let mut table = Table::new(&["Month", "Person", "Worked", "Earnings", "Deduction"]);
        for row in &rows {
            table.add_row(vec![
                row.month.clone(),
                row.person.to_string(),
                formatting::mins2readable(row.worked_minutes),
                formatting::format_money(row.earnings, &cfg.default_currency),
                formatting::format_money(row.deduction, &cfg.default_currency),
            ]);
        }
        println!("{}", table.render());
    }
    Ok(())
}
