use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::work::WorkLogLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::success;

use super::standard_bus;

/// Delete a work log entry by id.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        WorkLogLogic::delete(&mut engine, &bus, id)?;
        success(format!("Work log {} deleted", id));
    }
    Ok(())
}
