// src/export/model.rs

use crate::core::rates;
use crate::models::debt::Debt;
use crate::models::finance::FinanceRecord;
use crate::models::work_log::WorkLog;
use crate::utils::date;
use serde::Serialize;

/// Flat work-log row for the export writers. Person and date are rendered
/// in display form; a zero stored deduction is recomputed from earnings so
/// legacy rows export the same figure the summaries show.
#[derive(Debug, Serialize)]
pub struct WorkLogExport {
    pub id: String,
    pub person: String,
    pub date: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "break")]
    pub break_min: i64,
    pub worked: i64,
    pub earnings: f64,
    pub deduction: f64,
    pub activity: String,
    pub note: String,
}

impl From<&WorkLog> for WorkLogExport {
    fn from(log: &WorkLog) -> Self {
        let deduction = if log.deduction > 0.0 {
            log.deduction
        } else {
            rates::deduction_for(log.earnings, log.person)
        };
        Self {
            id: log.id.clone(),
            person: log.person.display_name().to_string(),
            date: date::display_date(&log.date),
            start: log.start.clone(),
            end: log.end.clone(),
            break_min: log.break_min,
            worked: log.worked,
            earnings: log.earnings,
            deduction,
            activity: log.activity.clone(),
            note: log.note.clone(),
        }
    }
}

/// Flat finance row. The stored record omits absent optional fields, which
/// would leave CSV rows with unequal lengths; here every row carries the
/// full set of columns.
#[derive(Debug, Serialize)]
pub struct FinanceExport {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub date: String,
    pub category: String,
    pub person: String,
    #[serde(rename = "debtId")]
    pub debt_id: String,
}

impl From<&FinanceRecord> for FinanceExport {
    fn from(rec: &FinanceRecord) -> Self {
        Self {
            id: rec.id.clone(),
            kind: rec.kind.code().to_string(),
            description: rec.description.clone(),
            amount: rec.amount,
            currency: rec.currency.clone(),
            date: date::display_date(&rec.date),
            category: rec.category.clone(),
            person: rec
                .person
                .map(|p| p.display_name().to_string())
                .unwrap_or_default(),
            debt_id: rec.debt_id.clone().unwrap_or_default(),
        }
    }
}

/// Flat debt row with the outstanding balance as its own column.
#[derive(Debug, Serialize)]
pub struct DebtExport {
    pub id: String,
    pub person: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub paid: f64,
    pub remaining: f64,
}

impl From<&Debt> for DebtExport {
    fn from(debt: &Debt) -> Self {
        Self {
            id: debt.id.clone(),
            person: debt.person.display_name().to_string(),
            description: debt.description.clone(),
            amount: debt.amount,
            currency: debt.currency.clone(),
            paid: debt.paid,
            remaining: debt.remaining(),
        }
    }
}
