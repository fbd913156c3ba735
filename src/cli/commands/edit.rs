use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::work::{WorkLogLogic, WorkLogPatch};
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::success;

use super::{parse_person_filter, standard_bus};

/// Edit a work log entry; derived fields are recomputed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        person,
        date,
        start,
        end,
        break_min,
        activity,
        note,
    } = cmd
    {
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        let patch = WorkLogPatch {
            person: parse_person_filter(person.as_deref())?,
            date: date.clone(),
            start: start.clone(),
            end: end.clone(),
            break_min: *break_min,
            activity: activity.clone(),
            note: note.clone(),
        };
        let log = WorkLogLogic::edit(&mut engine, &bus, id, &patch)?;

        success(format!(
            "Work log {} updated: {} on {}, {} -> {}",
            log.id, log.person, log.date, log.start, log.end
        ));
    }
    Ok(())
}
