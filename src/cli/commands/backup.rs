use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let mut engine = StorageEngine::open(cfg)?;
        BackupLogic::backup(&mut engine, file, *compress, *force)?;
    }
    Ok(())
}
