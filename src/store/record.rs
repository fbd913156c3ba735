//! Typed per-collection record contract shared by both backends.

use crate::models::debt::Debt;
use crate::models::finance::FinanceRecord;
use crate::models::work_log::WorkLog;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const WORK_LOGS: &str = "workLogs";
pub const FINANCES: &str = "finances";
pub const DEBTS: &str = "debts";

/// Lazily loaded in-memory copies of the list collections.
/// Non-authoritative: filled from the backend on first read of each type.
#[derive(Debug, Default)]
pub struct Cache {
    pub(crate) work_logs: Option<Vec<WorkLog>>,
    pub(crate) finances: Option<Vec<FinanceRecord>>,
    pub(crate) debts: Option<Vec<Debt>>,
}

/// A record persisted in one named collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Collection name as stored on disk and in backup files.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// The cache slot holding this record type.
    fn slot(cache: &mut Cache) -> &mut Option<Vec<Self>>;
}

impl Record for WorkLog {
    const COLLECTION: &'static str = WORK_LOGS;

    fn id(&self) -> &str {
        &self.id
    }

    fn slot(cache: &mut Cache) -> &mut Option<Vec<Self>> {
        &mut cache.work_logs
    }
}

impl Record for FinanceRecord {
    const COLLECTION: &'static str = FINANCES;

    fn id(&self) -> &str {
        &self.id
    }

    fn slot(cache: &mut Cache) -> &mut Option<Vec<Self>> {
        &mut cache.finances
    }
}

impl Record for Debt {
    const COLLECTION: &'static str = DEBTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn slot(cache: &mut Cache) -> &mut Option<Vec<Self>> {
        &mut cache.debts
    }
}
