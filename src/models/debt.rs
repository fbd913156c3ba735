use crate::models::default_currency;
use crate::models::person::Person;
use serde::{Deserialize, Serialize};

/// A debt owed by one person, with the running total of payments in `paid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub person: Person,
    pub description: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub paid: f64,
}

impl Debt {
    /// Outstanding balance; negative when overpaid.
    pub fn remaining(&self) -> f64 {
        self.amount - self.paid
    }

    pub fn is_open(&self) -> bool {
        self.remaining() > 0.0
    }
}
