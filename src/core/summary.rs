use crate::core::rates;
use crate::errors::AppResult;
use crate::models::person::Person;
use crate::models::work_log::WorkLog;
use crate::store::engine::StorageEngine;
use crate::utils::date;
use serde::Serialize;
use std::collections::HashMap;

/// Work totals for one person in one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub person: Person,
    pub month: String,
    pub worked_minutes: i64,
    pub earnings: f64,
    pub deduction: f64,
}

pub struct SummaryLogic;

impl SummaryLogic {
    /// Earnings and deduction totals grouped by person and month,
    /// newest month first.
    pub fn deductions(
        engine: &mut StorageEngine,
        person: Option<Person>,
    ) -> AppResult<Vec<MonthSummary>> {
        let logs = engine.get_all::<WorkLog>()?;

        let mut groups: HashMap<(Person, String), MonthSummary> = HashMap::new();
        for log in &logs {
            if let Some(p) = person
                && log.person != p
            {
                continue;
            }
            let month = date::month_of(&log.date).to_string();
            let entry = groups
                .entry((log.person, month.clone()))
                .or_insert_with(|| MonthSummary {
                    person: log.person,
                    month,
                    worked_minutes: 0,
                    earnings: 0.0,
                    deduction: 0.0,
                });
            entry.worked_minutes += log.worked;
            entry.earnings += log.earnings;
            // rows written before deductions existed carry 0; recompute those
            entry.deduction += if log.deduction > 0.0 {
                log.deduction
            } else {
                rates::deduction_for(log.earnings, log.person)
            };
        }

        let mut out: Vec<MonthSummary> = groups.into_values().collect();
        out.sort_by(|a, b| {
            b.month
                .cmp(&a.month)
                .then_with(|| a.person.code().cmp(b.person.code()))
        });
        Ok(out)
    }
}
