use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::work::WorkLogLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::success;
use crate::utils::formatting;

use super::{resolve_person, standard_bus};

/// Add a work log entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        person,
        start,
        end,
        break_min,
        activity,
        note,
    } = cmd
    {
        //
        // 1. Resolve the person (argument or configured default)
        //
        let person = resolve_person(person.as_deref(), cfg)?;

        //
        // 2. Open the store
        //
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        //
        // 3. Execute logic
        //
        let log = WorkLogLogic::add(
            &mut engine,
            &bus,
            person,
            date,
            start,
            end,
            *break_min,
            activity,
            note.as_deref().unwrap_or(""),
        )?;

        success(format!(
            "Work log recorded: {} worked {} and earned {}",
            log.person,
            formatting::mins2readable(log.worked),
            formatting::format_money(log.earnings, &cfg.default_currency),
        ));
        println!("🆔 Id: {}", log.id);
    }
    Ok(())
}
