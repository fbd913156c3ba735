//! Fallback backend: a single JSON file holding every collection under the
//! legacy flat keys, loaded wholly into memory and rewritten on every change.

use crate::errors::{AppError, AppResult};
use crate::models::settings::{
    EXPENSE_CATEGORIES_ID, RENT_SETTINGS_ID, TASK_CATEGORIES_ID, TIMER_STATE_ID,
};
use crate::store::backend::RestorePayload;
use crate::store::record::{DEBTS, FINANCES, WORK_LOGS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk image of the fallback store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(rename = "workLogs", default)]
    pub work_logs: Vec<Value>,
    #[serde(default)]
    pub finances: Vec<Value>,
    #[serde(default)]
    pub debts: Vec<Value>,
    #[serde(rename = "rentSettings", default, skip_serializing_if = "Option::is_none")]
    pub rent_settings: Option<Value>,
    #[serde(rename = "taskCategories", default, skip_serializing_if = "Option::is_none")]
    pub task_categories: Option<Value>,
    #[serde(
        rename = "expenseCategories",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expense_categories: Option<Value>,
    #[serde(rename = "timerState", default, skip_serializing_if = "Option::is_none")]
    pub timer_state: Option<Value>,
    /// Set once the contents have been imported into the primary store.
    #[serde(rename = "dbMigrated", default)]
    pub db_migrated: bool,
}

pub struct JsonStore {
    path: PathBuf,
    file: StoreFile,
}

impl JsonStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = match Self::peek(path)? {
            Some(f) => f,
            None => StoreFile::default(),
        };
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Read the file without keeping a store open (used for legacy import).
    pub fn peek(path: &Path) -> AppResult<Option<StoreFile>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Flag the file as imported so the legacy import never runs twice.
    pub fn mark_migrated(path: &Path) -> AppResult<()> {
        let mut store = Self::open(path)?;
        store.file.db_migrated = true;
        store.save()
    }

    /// Persist the whole image. Writes a temp file first, then renames, so a
    /// crashed write cannot leave a truncated store behind.
    fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.file)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn collection(&self, name: &str) -> AppResult<&Vec<Value>> {
        match name {
            WORK_LOGS => Ok(&self.file.work_logs),
            FINANCES => Ok(&self.file.finances),
            DEBTS => Ok(&self.file.debts),
            other => Err(AppError::Other(format!("unknown collection '{}'", other))),
        }
    }

    fn collection_mut(&mut self, name: &str) -> AppResult<&mut Vec<Value>> {
        match name {
            WORK_LOGS => Ok(&mut self.file.work_logs),
            FINANCES => Ok(&mut self.file.finances),
            DEBTS => Ok(&mut self.file.debts),
            other => Err(AppError::Other(format!("unknown collection '{}'", other))),
        }
    }

    fn setting_slot(&mut self, id: &str) -> AppResult<&mut Option<Value>> {
        match id {
            RENT_SETTINGS_ID => Ok(&mut self.file.rent_settings),
            TASK_CATEGORIES_ID => Ok(&mut self.file.task_categories),
            EXPENSE_CATEGORIES_ID => Ok(&mut self.file.expense_categories),
            TIMER_STATE_ID => Ok(&mut self.file.timer_state),
            other => Err(AppError::Other(format!("unknown settings id '{}'", other))),
        }
    }

    fn doc_id(doc: &Value) -> Option<&str> {
        doc.get("id").and_then(Value::as_str)
    }

    pub fn insert(&mut self, collection: &str, doc: &Value) -> AppResult<()> {
        self.collection_mut(collection)?.push(doc.clone());
        self.save()
    }

    pub fn insert_if_absent(&mut self, collection: &str, id: &str, doc: &Value) -> AppResult<bool> {
        let exists = self
            .collection(collection)?
            .iter()
            .any(|d| Self::doc_id(d) == Some(id));
        if exists {
            return Ok(false);
        }
        self.insert(collection, doc)?;
        Ok(true)
    }

    pub fn upsert(&mut self, collection: &str, id: &str, doc: &Value) -> AppResult<()> {
        let records = self.collection_mut(collection)?;
        match records.iter_mut().find(|d| Self::doc_id(d) == Some(id)) {
            Some(slot) => *slot = doc.clone(),
            None => records.push(doc.clone()),
        }
        self.save()
    }

    pub fn load_all(&self, collection: &str) -> AppResult<Vec<Value>> {
        Ok(self.collection(collection)?.clone())
    }

    pub fn remove(&mut self, collection: &str, id: &str) -> AppResult<()> {
        self.collection_mut(collection)?
            .retain(|d| Self::doc_id(d) != Some(id));
        self.save()
    }

    pub fn load_setting(&self, id: &str) -> AppResult<Option<Value>> {
        let slot = match id {
            RENT_SETTINGS_ID => &self.file.rent_settings,
            TASK_CATEGORIES_ID => &self.file.task_categories,
            EXPENSE_CATEGORIES_ID => &self.file.expense_categories,
            TIMER_STATE_ID => &self.file.timer_state,
            other => return Err(AppError::Other(format!("unknown settings id '{}'", other))),
        };
        Ok(slot.clone())
    }

    pub fn put_setting(&mut self, id: &str, doc: &Value) -> AppResult<()> {
        *self.setting_slot(id)? = Some(doc.clone());
        self.save()
    }

    pub fn put_setting_if_absent(&mut self, id: &str, doc: &Value) -> AppResult<bool> {
        if self.setting_slot(id)?.is_some() {
            return Ok(false);
        }
        self.put_setting(id, doc)?;
        Ok(true)
    }

    /// Swap in the restored collections wholesale. The migration flag is kept.
    pub fn replace_all(&mut self, payload: &RestorePayload) -> AppResult<()> {
        let docs = |items: &[(String, Value)]| items.iter().map(|(_, d)| d.clone()).collect();

        self.file.work_logs = docs(&payload.work_logs);
        self.file.finances = docs(&payload.finances);
        self.file.debts = docs(&payload.debts);

        for (id, doc) in &payload.settings {
            *self.setting_slot(id)? = Some(doc.clone());
        }

        self.save()
    }
}
