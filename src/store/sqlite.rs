//! Primary backend: one key/value table per collection in SQLite.

use crate::errors::{AppError, AppResult};
use crate::store::backend::RestorePayload;
use crate::store::record::{DEBTS, FINANCES, WORK_LOGS};
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::path::Path;

pub struct SqliteStore {
    pub conn: Connection,
}

fn table_for(collection: &str) -> AppResult<&'static str> {
    match collection {
        WORK_LOGS => Ok("work_logs"),
        FINANCES => Ok("finances"),
        DEBTS => Ok("debts"),
        other => Err(AppError::Other(format!("unknown collection '{}'", other))),
    }
}

impl SqliteStore {
    /// Open the database file. Any open failure is reported as
    /// BackendUnavailable so the caller can switch to the fallback.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create all tables if missing. Safe to run on every open.
    pub fn ensure_schema(&self) -> AppResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS work_logs (
                id   TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS finances (
                id   TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS debts (
                id   TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                id   TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS log (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                date      TEXT NOT NULL,
                operation TEXT NOT NULL,
                target    TEXT DEFAULT '',
                message   TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    pub fn insert(&self, collection: &str, id: &str, doc: &Value) -> AppResult<()> {
        let table = table_for(collection)?;
        let mut stmt = self
            .conn
            .prepare_cached(&format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", table))?;
        stmt.execute(params![id, doc.to_string()])?;
        Ok(())
    }

    /// Insert unless the id exists; returns true when a row was written.
    pub fn insert_if_absent(&self, collection: &str, id: &str, doc: &Value) -> AppResult<bool> {
        let table = table_for(collection)?;
        let mut stmt = self.conn.prepare_cached(&format!(
            "INSERT OR IGNORE INTO {} (id, body) VALUES (?1, ?2)",
            table
        ))?;
        let changed = stmt.execute(params![id, doc.to_string()])?;
        Ok(changed > 0)
    }

    pub fn upsert(&self, collection: &str, id: &str, doc: &Value) -> AppResult<()> {
        let table = table_for(collection)?;
        let mut stmt = self.conn.prepare_cached(&format!(
            "INSERT INTO {} (id, body) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET body = excluded.body",
            table
        ))?;
        stmt.execute(params![id, doc.to_string()])?;
        Ok(())
    }

    pub fn load_all(&self, collection: &str) -> AppResult<Vec<Value>> {
        let table = table_for(collection)?;
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT body FROM {} ORDER BY rowid ASC", table))?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut docs = Vec::new();
        for body in rows {
            docs.push(serde_json::from_str(&body?)?);
        }
        Ok(docs)
    }

    pub fn remove(&self, collection: &str, id: &str) -> AppResult<()> {
        let table = table_for(collection)?;
        let mut stmt = self
            .conn
            .prepare_cached(&format!("DELETE FROM {} WHERE id = ?1", table))?;
        stmt.execute(params![id])?;
        Ok(())
    }

    pub fn load_setting(&self, id: &str) -> AppResult<Option<Value>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT body FROM settings WHERE id = ?1")?;
        let body: Option<String> = stmt.query_row(params![id], |row| row.get(0)).optional()?;

        match body {
            Some(b) => Ok(Some(serde_json::from_str(&b)?)),
            None => Ok(None),
        }
    }

    pub fn put_setting(&self, id: &str, doc: &Value) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO settings (id, body) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET body = excluded.body",
        )?;
        stmt.execute(params![id, doc.to_string()])?;
        Ok(())
    }

    pub fn put_setting_if_absent(&self, id: &str, doc: &Value) -> AppResult<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT OR IGNORE INTO settings (id, body) VALUES (?1, ?2)")?;
        let changed = stmt.execute(params![id, doc.to_string()])?;
        Ok(changed > 0)
    }

    /// Clear and repopulate every collection in a single transaction, so a
    /// failed restore leaves the previous contents in place.
    pub fn replace_all(&mut self, payload: &RestorePayload) -> AppResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            "DELETE FROM work_logs;
             DELETE FROM finances;
             DELETE FROM debts;
             DELETE FROM settings;",
        )?;

        {
            let mut insert = |table: &str, docs: &[(String, Value)]| -> AppResult<()> {
                let mut stmt =
                    tx.prepare(&format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", table))?;
                for (id, doc) in docs {
                    stmt.execute(params![id, doc.to_string()])?;
                }
                Ok(())
            };

            insert("work_logs", &payload.work_logs)?;
            insert("finances", &payload.finances)?;
            insert("debts", &payload.debts)?;
            insert("settings", &payload.settings)?;
        }

        tx.commit()?;
        Ok(())
    }
}
