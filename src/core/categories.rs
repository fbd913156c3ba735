//! Task and expense category lists. Categories self-register when an
//! activity or expense uses a new name, and can be managed explicitly.

use crate::core::events::{DomainEvent, EventBus};
use crate::errors::AppResult;
use crate::models::settings::CategoryKind;
use crate::store::engine::StorageEngine;

pub struct CategoryLogic;

impl CategoryLogic {
    /// Implicit registration used by work logs, the timer and finances.
    /// Returns true when the name was new.
    pub fn register(
        engine: &mut StorageEngine,
        bus: &EventBus,
        kind: CategoryKind,
        name: &str,
    ) -> AppResult<bool> {
        let mut list = engine.categories(kind)?;
        if !list.register(name) {
            return Ok(false);
        }
        engine.put_categories(&list)?;
        bus.publish(&DomainEvent::CategoryRegistered {
            kind,
            name: name.to_string(),
        });
        Ok(true)
    }

    /// Explicit add from the CLI. Duplicates return false so the caller can
    /// warn instead of failing.
    pub fn add(
        engine: &mut StorageEngine,
        bus: &EventBus,
        kind: CategoryKind,
        name: &str,
    ) -> AppResult<bool> {
        let added = Self::register(engine, bus, kind, name)?;
        if added {
            engine.oplog(
                "category_add",
                kind.label(),
                &format!("Added {} category '{}'", kind.label(), name),
            )?;
        }
        Ok(added)
    }

    /// Remove by exact name. Returns false when the name was not present.
    pub fn remove(
        engine: &mut StorageEngine,
        bus: &EventBus,
        kind: CategoryKind,
        name: &str,
    ) -> AppResult<bool> {
        let mut list = engine.categories(kind)?;
        if !list.remove(name) {
            return Ok(false);
        }
        engine.put_categories(&list)?;
        engine.oplog(
            "category_del",
            kind.label(),
            &format!("Removed {} category '{}'", kind.label(), name),
        )?;
        bus.publish(&DomainEvent::CategoryRemoved {
            kind,
            name: name.to_string(),
        });
        Ok(true)
    }

    pub fn list(engine: &StorageEngine, kind: CategoryKind) -> AppResult<Vec<String>> {
        Ok(engine.categories(kind)?.categories)
    }
}
