use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::work::{WorkLogFilter, WorkLogLogic};
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::info;
use crate::utils::{formatting, table::Table};

use super::parse_person_filter;

/// List work log entries, newest first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        person,
        from,
        to,
        activity,
    } = cmd
    {
        let mut engine = StorageEngine::open(cfg)?;

        let filter = WorkLogFilter {
            person: parse_person_filter(person.as_deref())?,
            from: from.clone(),
            to: to.clone(),
            activity: activity.clone(),
        };
        let logs = WorkLogLogic::list(&mut engine, &filter)?;

        if logs.is_empty() {
            info("No work logs found.");
            return Ok(());
        }

        let mut table = Table::new(&[
            "Date", "Person", "In", "Out", "Break", "Worked", "Earnings", "Activity", "Id",
        ]);
        let mut total_minutes = 0;
        let mut total_earnings = 0.0;
        for log in &logs {
            total_minutes += log.worked;
            total_earnings += log.earnings;
            table.add_row(vec![
                log.date.clone(),
                log.person.to_string(),
                log.start.clone(),
                log.end.clone(),
                log.break_min.to_string(),
                formatting::mins2readable(log.worked),
                formatting::format_money(log.earnings, &cfg.default_currency),
                log.activity.clone(),
                log.id.clone(),
            ]);
        }

        println!("{}", table.render());
        println!(
            "Σ {} entries, {} worked, {} earned",
            logs.len(),
            formatting::mins2readable(total_minutes),
            formatting::format_money(total_earnings, &cfg.default_currency),
        );
    }
    Ok(())
}
