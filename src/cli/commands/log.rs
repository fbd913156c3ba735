use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::oplog::OplogLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let engine = StorageEngine::open(cfg)?;
        OplogLogic::print(&engine)?;
    }

    Ok(())
}
