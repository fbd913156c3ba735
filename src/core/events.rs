//! Typed notifications published after every successful mutation, so outer
//! layers can react without the managers knowing about them.

use crate::models::person::Person;
use crate::models::settings::CategoryKind;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    WorkLogAdded { id: String },
    WorkLogEdited { id: String },
    WorkLogDeleted { id: String },
    FinanceAdded { id: String },
    FinanceEdited { id: String },
    FinanceDeleted { id: String },
    DebtAdded { id: String },
    DebtEdited { id: String },
    DebtDeleted { id: String },
    PaymentAdded { debt_id: String, amount: f64 },
    PaymentEdited { debt_id: String, amount: f64 },
    PaymentDeleted { debt_id: String, amount: f64 },
    TimerStarted { person: Person },
    TimerPaused,
    TimerStopped { worked_minutes: i64 },
    CategoryRegistered { kind: CategoryKind, name: String },
    CategoryRemoved { kind: CategoryKind, name: String },
    DataRestored,
}

type Subscriber = Box<dyn Fn(&DomainEvent)>;

/// Minimal synchronous pub/sub channel. Subscribers run in registration
/// order on the caller's thread.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&DomainEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn publish(&self, event: &DomainEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}
