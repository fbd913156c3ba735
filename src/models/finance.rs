use crate::models::default_currency;
use crate::models::person::Person;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceKind {
    Income,
    Expense,
}

impl FinanceKind {
    pub fn code(&self) -> &'static str {
        match self {
            FinanceKind::Income => "income",
            FinanceKind::Expense => "expense",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "income" => Some(FinanceKind::Income),
            "expense" => Some(FinanceKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for FinanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An income or expense record. Debt payments are expenses carrying `debtId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FinanceKind,
    pub description: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(rename = "debtId", default, skip_serializing_if = "Option::is_none")]
    pub debt_id: Option<String>,
}

impl FinanceRecord {
    /// True when the record is a payment bound to a debt.
    pub fn is_debt_payment(&self) -> bool {
        self.debt_id.is_some()
    }
}
