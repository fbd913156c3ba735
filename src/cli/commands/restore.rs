use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{confirm, info, success, warning};

use super::standard_bus;

/// Replace the store contents with a snapshot. Everything currently in the
/// store is dropped, so this asks before acting unless --yes is given.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore { file, yes } = cmd {
        if !*yes {
            warning("Restoring replaces ALL current data with the snapshot contents.");
            if !confirm("Continue?") {
                info("Restore cancelled.");
                return Ok(());
            }
        }

        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();
        let snapshot = BackupLogic::restore(&mut engine, &bus, file)?;

        success(format!(
            "Store restored from {}: {} work log(s), {} finance record(s), {} debt(s)",
            file,
            snapshot.data.work_logs.len(),
            snapshot.data.finances.len(),
            snapshot.data.debts.len(),
        ));
    }
    Ok(())
}
