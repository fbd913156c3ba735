//! Work-log management: manual entries with validated times and derived
//! earnings/deduction values.

use crate::core::categories::CategoryLogic;
use crate::core::events::{DomainEvent, EventBus};
use crate::core::rates;
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::settings::CategoryKind;
use crate::models::work_log::WorkLog;
use crate::store::engine::StorageEngine;
use crate::utils::{date, ids, time};

/// Optional field overrides for `edit`.
#[derive(Debug, Default, Clone)]
pub struct WorkLogPatch {
    pub person: Option<Person>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub break_min: Option<i64>,
    pub activity: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct WorkLogFilter {
    pub person: Option<Person>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub activity: Option<String>,
}

impl WorkLogFilter {
    fn matches(&self, log: &WorkLog) -> bool {
        if let Some(p) = self.person
            && log.person != p
        {
            return false;
        }
        if let Some(from) = &self.from
            && log.date.as_str() < from.as_str()
        {
            return false;
        }
        if let Some(to) = &self.to
            && log.date.as_str() > to.as_str()
        {
            return false;
        }
        if let Some(activity) = &self.activity
            && &log.activity != activity
        {
            return false;
        }
        true
    }
}

/// Validate date, clock times and break; return the net worked minutes.
fn compute_worked(date_s: &str, start: &str, end: &str, break_min: i64) -> AppResult<i64> {
    if date::parse_date(date_s).is_none() {
        return Err(AppError::InvalidDate(date_s.to_string()));
    }
    let start_t =
        time::parse_time(start).ok_or_else(|| AppError::InvalidTime(start.to_string()))?;
    let end_t = time::parse_time(end).ok_or_else(|| AppError::InvalidTime(end.to_string()))?;
    if break_min < 0 {
        return Err(AppError::Validation("break cannot be negative".to_string()));
    }

    let worked = time::minutes_between(start_t, end_t) - break_min;
    if worked <= 0 {
        return Err(AppError::Validation(
            "worked time must be positive; check start, end and break".to_string(),
        ));
    }
    Ok(worked)
}

pub struct WorkLogLogic;

impl WorkLogLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        engine: &mut StorageEngine,
        bus: &EventBus,
        person: Person,
        date_s: &str,
        start: &str,
        end: &str,
        break_min: i64,
        activity: &str,
        note: &str,
    ) -> AppResult<WorkLog> {
        let activity = activity.trim();
        if activity.is_empty() {
            return Err(AppError::Validation("an activity is required".to_string()));
        }

        let worked = compute_worked(date_s, start, end, break_min)?;
        let earnings = rates::earnings_for(worked, person);

        let log = WorkLog {
            id: ids::new_id(),
            person,
            date: date_s.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            break_min,
            worked,
            earnings,
            deduction: rates::deduction_for(earnings, person),
            activity: activity.to_string(),
            note: note.to_string(),
        };

        CategoryLogic::register(engine, bus, CategoryKind::Task, activity)?;
        engine.add(&log)?;
        engine.oplog(
            "add",
            "worklog",
            &format!(
                "{} on {}: {} -> {} ({} min)",
                person.code(),
                log.date,
                log.start,
                log.end,
                worked
            ),
        )?;
        bus.publish(&DomainEvent::WorkLogAdded { id: log.id.clone() });
        Ok(log)
    }

    /// Apply the patch and recompute every derived field.
    pub fn edit(
        engine: &mut StorageEngine,
        bus: &EventBus,
        id: &str,
        patch: &WorkLogPatch,
    ) -> AppResult<WorkLog> {
        let mut log: WorkLog = engine
            .get(id)?
            .ok_or_else(|| AppError::Validation(format!("no work log with id '{}'", id)))?;

        if let Some(person) = patch.person {
            log.person = person;
        }
        if let Some(date_s) = &patch.date {
            log.date = date_s.clone();
        }
        if let Some(start) = &patch.start {
            log.start = start.clone();
        }
        if let Some(end) = &patch.end {
            log.end = end.clone();
        }
        if let Some(break_min) = patch.break_min {
            log.break_min = break_min;
        }
        if let Some(activity) = &patch.activity {
            let activity = activity.trim();
            if activity.is_empty() {
                return Err(AppError::Validation("an activity is required".to_string()));
            }
            log.activity = activity.to_string();
        }
        if let Some(note) = &patch.note {
            log.note = note.clone();
        }

        log.worked = compute_worked(&log.date, &log.start, &log.end, log.break_min)?;
        log.earnings = rates::earnings_for(log.worked, log.person);
        log.deduction = rates::deduction_for(log.earnings, log.person);

        CategoryLogic::register(engine, bus, CategoryKind::Task, &log.activity)?;
        engine.put(&log)?;
        engine.oplog(
            "edit",
            "worklog",
            &format!("{} ({} min on {})", log.id, log.worked, log.date),
        )?;
        bus.publish(&DomainEvent::WorkLogEdited { id: log.id.clone() });
        Ok(log)
    }

    pub fn delete(engine: &mut StorageEngine, bus: &EventBus, id: &str) -> AppResult<()> {
        let log: WorkLog = engine
            .get(id)?
            .ok_or_else(|| AppError::Validation(format!("no work log with id '{}'", id)))?;

        engine.delete::<WorkLog>(id)?;
        engine.oplog(
            "del",
            "worklog",
            &format!("{} ({} on {})", log.id, log.person.code(), log.date),
        )?;
        bus.publish(&DomainEvent::WorkLogDeleted { id: log.id });
        Ok(())
    }

    /// Filtered work logs, newest first.
    pub fn list(engine: &mut StorageEngine, filter: &WorkLogFilter) -> AppResult<Vec<WorkLog>> {
        let mut logs: Vec<WorkLog> = engine
            .get_all::<WorkLog>()?
            .into_iter()
            .filter(|log| filter.matches(log))
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date).then(b.start.cmp(&a.start)));
        Ok(logs)
    }
}
