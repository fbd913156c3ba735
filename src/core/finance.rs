//! Income and expense records. Deleting a record that is a debt payment
//! releases its share from the debt before the record goes away.

use crate::core::categories::CategoryLogic;
use crate::core::events::{DomainEvent, EventBus};
use crate::errors::{AppError, AppResult};
use crate::models::debt::Debt;
use crate::models::finance::{FinanceKind, FinanceRecord};
use crate::models::person::Person;
use crate::models::settings::CategoryKind;
use crate::store::engine::StorageEngine;
use crate::utils::{date, ids};

#[derive(Debug, Default, Clone)]
pub struct FinancePatch {
    pub kind: Option<FinanceKind>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub person: Option<Person>,
}

#[derive(Debug, Default, Clone)]
pub struct FinanceFilter {
    pub kind: Option<FinanceKind>,
    pub person: Option<Person>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FinanceFilter {
    fn matches(&self, rec: &FinanceRecord) -> bool {
        if let Some(kind) = self.kind
            && rec.kind != kind
        {
            return false;
        }
        if let Some(person) = self.person
            && rec.person != Some(person)
        {
            return false;
        }
        if let Some(from) = &self.from
            && rec.date.as_str() < from.as_str()
        {
            return false;
        }
        if let Some(to) = &self.to
            && rec.date.as_str() > to.as_str()
        {
            return false;
        }
        true
    }
}

fn validate(description: &str, amount: f64, date_s: &str, category: &str) -> AppResult<()> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("a description is required".to_string()));
    }
    if amount <= 0.0 {
        return Err(AppError::Validation("amount must be positive".to_string()));
    }
    if date::parse_date(date_s).is_none() {
        return Err(AppError::InvalidDate(date_s.to_string()));
    }
    if category.trim().is_empty() {
        return Err(AppError::Validation("a category is required".to_string()));
    }
    Ok(())
}

pub struct FinanceLogic;

impl FinanceLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        engine: &mut StorageEngine,
        bus: &EventBus,
        kind: FinanceKind,
        description: &str,
        amount: f64,
        currency: &str,
        date_s: &str,
        category: &str,
        person: Option<Person>,
    ) -> AppResult<FinanceRecord> {
        validate(description, amount, date_s, category)?;

        let record = FinanceRecord {
            id: ids::new_id(),
            kind,
            description: description.trim().to_string(),
            amount,
            currency: currency.to_string(),
            date: date_s.to_string(),
            category: category.trim().to_string(),
            person,
            debt_id: None,
        };

        if kind == FinanceKind::Expense {
            CategoryLogic::register(engine, bus, CategoryKind::Expense, &record.category)?;
        }
        engine.add(&record)?;
        engine.oplog(
            "add",
            "finance",
            &format!(
                "{} '{}' {} on {}",
                record.kind, record.description, record.amount, record.date
            ),
        )?;
        bus.publish(&DomainEvent::FinanceAdded {
            id: record.id.clone(),
        });
        Ok(record)
    }

    /// Edit a plain record. Debt payments are refused here so their link to
    /// the debt balance cannot be silently broken.
    pub fn edit(
        engine: &mut StorageEngine,
        bus: &EventBus,
        id: &str,
        patch: &FinancePatch,
    ) -> AppResult<FinanceRecord> {
        let mut record: FinanceRecord = engine
            .get(id)?
            .ok_or_else(|| AppError::Validation(format!("no finance record with id '{}'", id)))?;

        if record.is_debt_payment() {
            return Err(AppError::Validation(
                "this record is a debt payment; use 'payment edit' to change it".to_string(),
            ));
        }

        if let Some(kind) = patch.kind {
            record.kind = kind;
        }
        if let Some(description) = &patch.description {
            record.description = description.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            record.amount = amount;
        }
        if let Some(currency) = &patch.currency {
            record.currency = currency.clone();
        }
        if let Some(date_s) = &patch.date {
            record.date = date_s.clone();
        }
        if let Some(category) = &patch.category {
            record.category = category.trim().to_string();
        }
        if let Some(person) = patch.person {
            record.person = Some(person);
        }

        validate(&record.description, record.amount, &record.date, &record.category)?;

        if record.kind == FinanceKind::Expense {
            CategoryLogic::register(engine, bus, CategoryKind::Expense, &record.category)?;
        }
        engine.put(&record)?;
        engine.oplog("edit", "finance", &record.id)?;
        bus.publish(&DomainEvent::FinanceEdited {
            id: record.id.clone(),
        });
        Ok(record)
    }

    /// Delete a record. For debt payments the debt balance is reduced first,
    /// clamped at zero, then the record is removed.
    pub fn delete(engine: &mut StorageEngine, bus: &EventBus, id: &str) -> AppResult<()> {
        let record: FinanceRecord = engine
            .get(id)?
            .ok_or_else(|| AppError::Validation(format!("no finance record with id '{}'", id)))?;

        if let Some(debt_id) = &record.debt_id {
            if let Some(mut debt) = engine.get::<Debt>(debt_id)? {
                debt.paid = (debt.paid - record.amount).max(0.0);
                engine.put(&debt)?;
            }
            engine.delete::<FinanceRecord>(id)?;
            engine.oplog(
                "del",
                "payment",
                &format!("{} ({} towards debt {})", record.id, record.amount, debt_id),
            )?;
            bus.publish(&DomainEvent::PaymentDeleted {
                debt_id: debt_id.clone(),
                amount: record.amount,
            });
        } else {
            engine.delete::<FinanceRecord>(id)?;
            engine.oplog("del", "finance", &record.id)?;
        }

        bus.publish(&DomainEvent::FinanceDeleted { id: record.id });
        Ok(())
    }

    /// Filtered records, newest first.
    pub fn list(
        engine: &mut StorageEngine,
        filter: &FinanceFilter,
    ) -> AppResult<Vec<FinanceRecord>> {
        let mut records: Vec<FinanceRecord> = engine
            .get_all::<FinanceRecord>()?
            .into_iter()
            .filter(|rec| filter.matches(rec))
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}
