//! Storage engine: owns the active backend and the typed in-memory cache.
//!
//! Opens the SQLite store first and switches permanently to the JSON fallback
//! when it cannot be opened. On a successful primary open it creates the
//! schema, imports a not-yet-migrated legacy JSON store once, and seeds the
//! settings documents.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::settings::{
    CategoryKind, CategoryList, EXPENSE_CATEGORIES_ID, RENT_SETTINGS_ID, RentSettings,
    TASK_CATEGORIES_ID, TIMER_STATE_ID, TimerState,
};
use crate::models::snapshot::{SNAPSHOT_VERSION, SettingsBundle, Snapshot, SnapshotData};
use crate::store::backend::{Backend, RestorePayload};
use crate::store::json::JsonStore;
use crate::store::log::LogEntry;
use crate::store::record::{Cache, DEBTS, FINANCES, Record, WORK_LOGS};
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::warning;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

const LEGACY_IMPORT_MARKER: &str = "legacy_store";

pub struct StorageEngine {
    backend: Backend,
    cache: Cache,
}

impl StorageEngine {
    /// Open the configured stores. A primary that cannot be opened is not
    /// fatal: the engine warns and serves everything from the fallback.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        match Self::open_primary(&cfg.database, &cfg.fallback) {
            Ok(engine) => Ok(engine),
            Err(AppError::BackendUnavailable(msg)) => {
                warning(format!(
                    "Primary store '{}' unavailable ({}). Using the JSON fallback store.",
                    cfg.database, msg
                ));
                Self::open_fallback(&cfg.fallback)
            }
            Err(other) => Err(other),
        }
    }

    fn open_primary(db_path: &str, fallback_path: &str) -> AppResult<Self> {
        let store = SqliteStore::open(db_path)?;
        store
            .ensure_schema()
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;

        let mut engine = Self {
            backend: Backend::Sqlite(store),
            cache: Cache::default(),
        };
        engine.import_legacy(fallback_path)?;
        engine.seed_settings()?;
        Ok(engine)
    }

    /// Open the JSON store directly, bypassing SQLite entirely.
    pub fn open_fallback(path: &str) -> AppResult<Self> {
        let store = JsonStore::open(Path::new(path))?;
        let mut engine = Self {
            backend: Backend::Json(store),
            cache: Cache::default(),
        };
        engine.seed_settings()?;
        Ok(engine)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // ------------------------------------------------
    // Initialization
    // ------------------------------------------------

    /// One-time import of a legacy fallback file into the primary store.
    /// Runs only while the file's `dbMigrated` flag is unset and no import
    /// marker exists in the log, so a crashed import can resume safely.
    fn import_legacy(&mut self, fallback_path: &str) -> AppResult<()> {
        let path = Path::new(fallback_path);
        let Some(legacy) = JsonStore::peek(path)? else {
            return Ok(());
        };
        if legacy.db_migrated
            || self.backend.has_log_marker("migration_applied", LEGACY_IMPORT_MARKER)?
        {
            return Ok(());
        }

        let mut imported = 0usize;

        let collections: [(&str, &Vec<Value>); 3] = [
            (WORK_LOGS, &legacy.work_logs),
            (FINANCES, &legacy.finances),
            (DEBTS, &legacy.debts),
        ];
        for (collection, docs) in collections {
            for doc in docs {
                let Some(id) = doc.get("id").and_then(Value::as_str) else {
                    continue;
                };
                if self.backend.insert_if_absent(collection, id, doc)? {
                    imported += 1;
                }
            }
        }

        let settings: [(&str, &Option<Value>); 4] = [
            (RENT_SETTINGS_ID, &legacy.rent_settings),
            (TASK_CATEGORIES_ID, &legacy.task_categories),
            (EXPENSE_CATEGORIES_ID, &legacy.expense_categories),
            (TIMER_STATE_ID, &legacy.timer_state),
        ];
        for (id, slot) in settings {
            if let Some(doc) = slot {
                // hand-written legacy files may lack the id field
                let mut doc = doc.clone();
                if doc.get("id").is_none()
                    && let Value::Object(map) = &mut doc
                {
                    map.insert("id".to_string(), Value::String(id.to_string()));
                }
                if self.backend.put_setting_if_absent(id, &doc)? {
                    imported += 1;
                }
            }
        }

        JsonStore::mark_migrated(path)?;
        self.backend.oplog(
            "migration_applied",
            LEGACY_IMPORT_MARKER,
            &format!("Imported {} records from {}", imported, path.display()),
        )?;
        Ok(())
    }

    /// Create the four settings documents when missing.
    fn seed_settings(&mut self) -> AppResult<()> {
        let defaults: [(&str, Value); 4] = [
            (RENT_SETTINGS_ID, serde_json::to_value(RentSettings::default())?),
            (
                TASK_CATEGORIES_ID,
                serde_json::to_value(CategoryList::empty(CategoryKind::Task))?,
            ),
            (
                EXPENSE_CATEGORIES_ID,
                serde_json::to_value(CategoryList::empty(CategoryKind::Expense))?,
            ),
            (TIMER_STATE_ID, serde_json::to_value(TimerState::default())?),
        ];

        for (id, doc) in &defaults {
            self.backend.put_setting_if_absent(id, doc)?;
        }
        Ok(())
    }

    // ------------------------------------------------
    // Typed record operations
    // ------------------------------------------------

    fn loaded<T: Record>(&mut self) -> AppResult<&mut Vec<T>> {
        if T::slot(&mut self.cache).is_none() {
            let docs = self.backend.load_all(T::COLLECTION)?;
            let mut records = Vec::with_capacity(docs.len());
            for doc in docs {
                records.push(serde_json::from_value(doc)?);
            }
            *T::slot(&mut self.cache) = Some(records);
        }

        Ok(T::slot(&mut self.cache).get_or_insert_with(Vec::new))
    }

    /// Insert a new record. Adding an id that already exists is rejected on
    /// both backends.
    pub fn add<T: Record>(&mut self, record: &T) -> AppResult<()> {
        let exists = self.loaded::<T>()?.iter().any(|r| r.id() == record.id());
        if exists {
            return Err(AppError::DuplicateKey(format!(
                "{} already contains id '{}'",
                T::COLLECTION,
                record.id()
            )));
        }

        let doc = serde_json::to_value(record)?;
        self.backend.insert(T::COLLECTION, record.id(), &doc)?;
        self.loaded::<T>()?.push(record.clone());
        Ok(())
    }

    /// Insert or replace by id.
    pub fn put<T: Record>(&mut self, record: &T) -> AppResult<()> {
        let doc = serde_json::to_value(record)?;
        self.backend.upsert(T::COLLECTION, record.id(), &doc)?;

        let records = self.loaded::<T>()?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    /// Owned copy of one record; absence is a normal empty result.
    pub fn get<T: Record>(&mut self, id: &str) -> AppResult<Option<T>> {
        Ok(self.loaded::<T>()?.iter().find(|r| r.id() == id).cloned())
    }

    /// Owned copy of the whole collection, in insertion order.
    pub fn get_all<T: Record>(&mut self) -> AppResult<Vec<T>> {
        Ok(self.loaded::<T>()?.clone())
    }

    /// Remove a record; deleting an absent id is a no-op.
    pub fn delete<T: Record>(&mut self, id: &str) -> AppResult<()> {
        self.backend.remove(T::COLLECTION, id)?;
        self.loaded::<T>()?.retain(|r| r.id() != id);
        Ok(())
    }

    // ------------------------------------------------
    // Settings documents
    // ------------------------------------------------

    fn setting_doc<T: DeserializeOwned>(&self, id: &str) -> AppResult<Option<T>> {
        match self.backend.load_setting(id)? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    fn put_setting_doc<T: Serialize>(&mut self, id: &str, doc: &T) -> AppResult<()> {
        self.backend.put_setting(id, &serde_json::to_value(doc)?)
    }

    pub fn rent_settings(&self) -> AppResult<RentSettings> {
        Ok(self.setting_doc(RENT_SETTINGS_ID)?.unwrap_or_default())
    }

    pub fn put_rent_settings(&mut self, rent: &RentSettings) -> AppResult<()> {
        self.put_setting_doc(RENT_SETTINGS_ID, rent)
    }

    pub fn categories(&self, kind: CategoryKind) -> AppResult<CategoryList> {
        Ok(self
            .setting_doc(kind.settings_id())?
            .unwrap_or_else(|| CategoryList::empty(kind)))
    }

    pub fn put_categories(&mut self, list: &CategoryList) -> AppResult<()> {
        self.put_setting_doc(&list.id, list)
    }

    pub fn timer_state(&self) -> AppResult<TimerState> {
        Ok(self.setting_doc(TIMER_STATE_ID)?.unwrap_or_default())
    }

    pub fn put_timer_state(&mut self, state: &TimerState) -> AppResult<()> {
        self.put_setting_doc(TIMER_STATE_ID, state)
    }

    // ------------------------------------------------
    // Operation log
    // ------------------------------------------------

    pub fn oplog(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.backend.oplog(operation, target, message)
    }

    pub fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        self.backend.log_entries()
    }

    // ------------------------------------------------
    // Backup & restore
    // ------------------------------------------------

    /// Snapshot of every collection, with defaults substituted for any
    /// missing settings document.
    pub fn backup(&mut self) -> AppResult<Snapshot> {
        Ok(Snapshot {
            timestamp: Utc::now().timestamp_millis(),
            version: SNAPSHOT_VERSION,
            data: SnapshotData {
                work_logs: self.get_all()?,
                finances: self.get_all()?,
                debts: self.get_all()?,
                settings: SettingsBundle {
                    rent_settings: self.rent_settings()?,
                    task_categories: self.categories(CategoryKind::Task)?,
                    expense_categories: self.categories(CategoryKind::Expense)?,
                    timer_state: self.timer_state()?,
                },
            },
        })
    }

    /// Replace the whole store with the snapshot contents. On SQLite this is
    /// one transaction; a failure leaves the previous data in place.
    pub fn restore(&mut self, snapshot: &Snapshot) -> AppResult<()> {
        let data = &snapshot.data;
        let mut payload = RestorePayload::default();

        for log in &data.work_logs {
            payload.work_logs.push((log.id.clone(), serde_json::to_value(log)?));
        }
        for rec in &data.finances {
            payload.finances.push((rec.id.clone(), serde_json::to_value(rec)?));
        }
        for debt in &data.debts {
            payload.debts.push((debt.id.clone(), serde_json::to_value(debt)?));
        }
        // the slot determines the id; backups may carry stale or missing ones
        let mut settings = data.settings.clone();
        settings.rent_settings.id = RENT_SETTINGS_ID.to_string();
        settings.task_categories.id = TASK_CATEGORIES_ID.to_string();
        settings.expense_categories.id = EXPENSE_CATEGORIES_ID.to_string();
        settings.timer_state.id = TIMER_STATE_ID.to_string();

        payload.settings = vec![
            (
                RENT_SETTINGS_ID.to_string(),
                serde_json::to_value(&settings.rent_settings)?,
            ),
            (
                TASK_CATEGORIES_ID.to_string(),
                serde_json::to_value(&settings.task_categories)?,
            ),
            (
                EXPENSE_CATEGORIES_ID.to_string(),
                serde_json::to_value(&settings.expense_categories)?,
            ),
            (
                TIMER_STATE_ID.to_string(),
                serde_json::to_value(&settings.timer_state)?,
            ),
        ];

        self.backend.replace_all(&payload)?;

        self.cache.work_logs = Some(data.work_logs.clone());
        self.cache.finances = Some(data.finances.clone());
        self.cache.debts = Some(data.debts.clone());

        self.backend.oplog(
            "restore",
            "snapshot",
            &format!(
                "Restored {} work logs, {} finances, {} debts",
                data.work_logs.len(),
                data.finances.len(),
                data.debts.len()
            ),
        )?;
        Ok(())
    }
}
