//! Debts and their linked payments. A payment is a finance record with
//! `debt_id` set; the matching debt carries a running `paid` total.
//!
//! Write ordering is deliberate: a debt's paid total only grows after the
//! payment record backing it is on disk. Adding a payment writes the record
//! before touching the debt; editing one writes the record before charging
//! a debt, releasing the old debt first on a move; deleting releases the
//! debt before the record goes. A crash in between never leaves a debt
//! counting money that has no record.

use crate::core::events::{DomainEvent, EventBus};
use crate::errors::{AppError, AppResult};
use crate::models::debt::Debt;
use crate::models::finance::{FinanceKind, FinanceRecord};
use crate::models::person::Person;
use crate::store::engine::StorageEngine;
use crate::utils::{date, ids};

/// Description prefix shared by every generated payment record.
pub const PAYMENT_PREFIX: &str = "Debt payment: ";

const PAYMENT_CATEGORY: &str = "debt payment";

#[derive(Debug, Default, Clone)]
pub struct DebtPatch {
    pub person: Option<Person>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

pub struct DebtLogic;

impl DebtLogic {
    pub fn add(
        engine: &mut StorageEngine,
        bus: &EventBus,
        person: Person,
        description: &str,
        amount: f64,
        currency: &str,
    ) -> AppResult<Debt> {
        if description.trim().is_empty() {
            return Err(AppError::Validation("a description is required".to_string()));
        }
        if amount <= 0.0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }

        let debt = Debt {
            id: ids::new_id(),
            person,
            description: description.trim().to_string(),
            amount,
            currency: currency.to_string(),
            paid: 0.0,
        };
        engine.add(&debt)?;
        engine.oplog(
            "add",
            "debt",
            &format!("{} owes {} for '{}'", debt.person, debt.amount, debt.description),
        )?;
        bus.publish(&DomainEvent::DebtAdded {
            id: debt.id.clone(),
        });
        Ok(debt)
    }

    /// Edit the debt itself. The paid total only moves through payments.
    pub fn edit(
        engine: &mut StorageEngine,
        bus: &EventBus,
        id: &str,
        patch: &DebtPatch,
    ) -> AppResult<Debt> {
        let mut debt: Debt = engine
            .get(id)?
            .ok_or_else(|| AppError::Validation(format!("no debt with id '{}'", id)))?;

        if let Some(person) = patch.person {
            debt.person = person;
        }
        if let Some(description) = &patch.description {
            debt.description = description.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            debt.amount = amount;
        }
        if let Some(currency) = &patch.currency {
            debt.currency = currency.clone();
        }

        if debt.description.is_empty() {
            return Err(AppError::Validation("a description is required".to_string()));
        }
        if debt.amount <= 0.0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }

        engine.put(&debt)?;
        engine.oplog("edit", "debt", &debt.id)?;
        bus.publish(&DomainEvent::DebtEdited {
            id: debt.id.clone(),
        });
        Ok(debt)
    }

    pub fn list(
        engine: &mut StorageEngine,
        person: Option<Person>,
        open_only: bool,
    ) -> AppResult<Vec<Debt>> {
        let debts = engine
            .get_all::<Debt>()?
            .into_iter()
            .filter(|d| person.is_none_or(|p| d.person == p))
            .filter(|d| !open_only || d.is_open())
            .collect();
        Ok(debts)
    }

    pub fn open_debts(engine: &mut StorageEngine, person: Person) -> AppResult<Vec<Debt>> {
        Self::list(engine, Some(person), true)
    }

    /// Payments recorded against one debt, newest first.
    pub fn linked_payments(
        engine: &mut StorageEngine,
        debt_id: &str,
    ) -> AppResult<Vec<FinanceRecord>> {
        let mut payments: Vec<FinanceRecord> = engine
            .get_all::<FinanceRecord>()?
            .into_iter()
            .filter(|rec| rec.debt_id.as_deref() == Some(debt_id))
            .collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(payments)
    }

    /// Delete a debt and every payment linked to it. The debt goes first so a
    /// partial cascade leaves orphaned records, not a phantom balance.
    /// Returns how many payments were removed.
    pub fn delete(engine: &mut StorageEngine, bus: &EventBus, id: &str) -> AppResult<usize> {
        let debt: Debt = engine
            .get(id)?
            .ok_or_else(|| AppError::Validation(format!("no debt with id '{}'", id)))?;
        let payments = Self::linked_payments(engine, id)?;

        engine.delete::<Debt>(id)?;
        for payment in &payments {
            engine.delete::<FinanceRecord>(&payment.id)?;
            bus.publish(&DomainEvent::FinanceDeleted {
                id: payment.id.clone(),
            });
        }

        engine.oplog(
            "del",
            "debt",
            &format!("'{}' and {} linked payment(s)", debt.description, payments.len()),
        )?;
        bus.publish(&DomainEvent::DebtDeleted { id: debt.id });
        Ok(payments.len())
    }

    /// Record a payment towards a debt. The finance record is written first,
    /// then the debt total catches up.
    pub fn add_payment(
        engine: &mut StorageEngine,
        bus: &EventBus,
        debt_id: &str,
        amount: f64,
        date_s: Option<&str>,
    ) -> AppResult<FinanceRecord> {
        let mut debt: Debt = engine
            .get(debt_id)?
            .ok_or_else(|| AppError::Validation(format!("no debt with id '{}'", debt_id)))?;
        if amount <= 0.0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }
        let date_s = match date_s {
            Some(d) if date::parse_date(d).is_some() => d.to_string(),
            Some(d) => return Err(AppError::InvalidDate(d.to_string())),
            None => date::today_string(),
        };

        let payment = FinanceRecord {
            id: ids::new_id(),
            kind: FinanceKind::Expense,
            description: format!("{}{}", PAYMENT_PREFIX, debt.description),
            amount,
            currency: debt.currency.clone(),
            date: date_s,
            category: PAYMENT_CATEGORY.to_string(),
            person: Some(debt.person),
            debt_id: Some(debt.id.clone()),
        };
        engine.add(&payment)?;

        debt.paid += amount;
        engine.put(&debt)?;

        engine.oplog(
            "add",
            "payment",
            &format!("{} towards '{}'", amount, debt.description),
        )?;
        bus.publish(&DomainEvent::PaymentAdded {
            debt_id: debt.id.clone(),
            amount,
        });
        Ok(payment)
    }

    /// Change a payment's amount, optionally moving it to another debt.
    /// Same debt: the paid total shifts by the difference. Moved: the old
    /// debt is released (clamped at zero) and the new one charged in full.
    pub fn edit_payment(
        engine: &mut StorageEngine,
        bus: &EventBus,
        payment_id: &str,
        amount: f64,
        move_to: Option<&str>,
    ) -> AppResult<FinanceRecord> {
        let mut payment: FinanceRecord = engine
            .get(payment_id)?
            .ok_or_else(|| AppError::Validation(format!("no payment with id '{}'", payment_id)))?;
        let Some(old_debt_id) = payment.debt_id.clone() else {
            return Err(AppError::Validation(
                "this finance record is not a debt payment".to_string(),
            ));
        };
        if amount <= 0.0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }
        let old_amount = payment.amount;

        let target_debt_id = match move_to {
            Some(new_debt_id) if new_debt_id != old_debt_id => {
                let mut new_debt: Debt = engine.get(new_debt_id)?.ok_or_else(|| {
                    AppError::Validation(format!("no debt with id '{}'", new_debt_id))
                })?;
                if let Some(mut old_debt) = engine.get::<Debt>(&old_debt_id)? {
                    old_debt.paid = (old_debt.paid - old_amount).max(0.0);
                    engine.put(&old_debt)?;
                }

                payment.description = format!("{}{}", PAYMENT_PREFIX, new_debt.description);
                payment.person = Some(new_debt.person);
                payment.debt_id = Some(new_debt.id.clone());
                payment.amount = amount;
                engine.put(&payment)?;

                new_debt.paid += amount;
                engine.put(&new_debt)?;
                new_debt.id
            }
            _ => {
                let mut debt: Debt = engine.get(&old_debt_id)?.ok_or_else(|| {
                    AppError::Validation(format!("no debt with id '{}'", old_debt_id))
                })?;
                payment.amount = amount;
                engine.put(&payment)?;

                debt.paid = debt.paid - old_amount + amount;
                engine.put(&debt)?;
                old_debt_id
            }
        };

        engine.oplog("edit", "payment", &payment.id)?;
        bus.publish(&DomainEvent::PaymentEdited {
            debt_id: target_debt_id,
            amount,
        });
        Ok(payment)
    }
}
