use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::engine::StorageEngine;

use super::parse_person_filter;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        person,
        from,
        to,
        force,
    } = cmd
    {
        let mut engine = StorageEngine::open(cfg)?;
        ExportLogic::export(
            &mut engine,
            *what,
            *format,
            file,
            parse_person_filter(person.as_deref())?,
            from.clone(),
            to.clone(),
            *force,
        )?;
    }
    Ok(())
}
