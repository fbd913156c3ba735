//! The two interchangeable storage backends behind one dispatching surface.
//! The variant is chosen once at open time and never changes afterwards.

use crate::errors::AppResult;
use crate::store::json::JsonStore;
use crate::store::log::{self, LogEntry};
use crate::store::sqlite::SqliteStore;
use serde_json::Value;

/// Everything `restore` rewrites, already serialized per collection.
#[derive(Debug, Default)]
pub struct RestorePayload {
    pub work_logs: Vec<(String, Value)>,
    pub finances: Vec<(String, Value)>,
    pub debts: Vec<(String, Value)>,
    pub settings: Vec<(String, Value)>,
}

pub enum Backend {
    Sqlite(SqliteStore),
    Json(JsonStore),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Sqlite(_) => "sqlite",
            Backend::Json(_) => "json",
        }
    }

    pub fn insert(&mut self, collection: &str, id: &str, doc: &Value) -> AppResult<()> {
        match self {
            Backend::Sqlite(s) => s.insert(collection, id, doc),
            Backend::Json(s) => s.insert(collection, doc),
        }
    }

    pub fn insert_if_absent(&mut self, collection: &str, id: &str, doc: &Value) -> AppResult<bool> {
        match self {
            Backend::Sqlite(s) => s.insert_if_absent(collection, id, doc),
            Backend::Json(s) => s.insert_if_absent(collection, id, doc),
        }
    }

    pub fn upsert(&mut self, collection: &str, id: &str, doc: &Value) -> AppResult<()> {
        match self {
            Backend::Sqlite(s) => s.upsert(collection, id, doc),
            Backend::Json(s) => s.upsert(collection, id, doc),
        }
    }

    pub fn load_all(&self, collection: &str) -> AppResult<Vec<Value>> {
        match self {
            Backend::Sqlite(s) => s.load_all(collection),
            Backend::Json(s) => s.load_all(collection),
        }
    }

    pub fn remove(&mut self, collection: &str, id: &str) -> AppResult<()> {
        match self {
            Backend::Sqlite(s) => s.remove(collection, id),
            Backend::Json(s) => s.remove(collection, id),
        }
    }

    pub fn load_setting(&self, id: &str) -> AppResult<Option<Value>> {
        match self {
            Backend::Sqlite(s) => s.load_setting(id),
            Backend::Json(s) => s.load_setting(id),
        }
    }

    pub fn put_setting(&mut self, id: &str, doc: &Value) -> AppResult<()> {
        match self {
            Backend::Sqlite(s) => s.put_setting(id, doc),
            Backend::Json(s) => s.put_setting(id, doc),
        }
    }

    pub fn put_setting_if_absent(&mut self, id: &str, doc: &Value) -> AppResult<bool> {
        match self {
            Backend::Sqlite(s) => s.put_setting_if_absent(id, doc),
            Backend::Json(s) => s.put_setting_if_absent(id, doc),
        }
    }

    pub fn replace_all(&mut self, payload: &RestorePayload) -> AppResult<()> {
        match self {
            Backend::Sqlite(s) => s.replace_all(payload),
            Backend::Json(s) => s.replace_all(payload),
        }
    }

    /// Operation log lives in the primary store only; the fallback skips it.
    pub fn oplog(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        match self {
            Backend::Sqlite(s) => log::append(&s.conn, operation, target, message),
            Backend::Json(_) => Ok(()),
        }
    }

    pub fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        match self {
            Backend::Sqlite(s) => log::entries(&s.conn),
            Backend::Json(_) => Ok(Vec::new()),
        }
    }

    pub fn has_log_marker(&self, operation: &str, target: &str) -> AppResult<bool> {
        match self {
            Backend::Sqlite(s) => log::has_marker(&s.conn, operation, target),
            Backend::Json(_) => Ok(false),
        }
    }
}
