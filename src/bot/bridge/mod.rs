//! Fan-out of session events to log observers.
//!
//! The session never talks to the console, the log file or the control panel
//! directly. It publishes a [`SessionEvent`]; the bridge turns it into a
//! [`LogRecord`] and hands that record to every subscribed [`Observer`] in
//! subscription order.
//!
//! Publishing is serialised so each observer sees records in production order, and
//! it never fails: an observer that returns an error or panics is reported through
//! tracing and the fallback observer, and the remaining observers still receive the
//! record.

pub mod event;
pub mod observer;

use chrono::Local;
use dioxus_logger::tracing;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::bot::error::observer::ObserverError;
use crate::model::log::{LogLevel, LogRecord};

pub use event::SessionEvent;

/// Receiver of published log records.
pub trait Observer: Send + Sync {
    /// Short name used when reporting this observer's failures.
    fn name(&self) -> &str;

    fn receive(&self, record: &LogRecord) -> Result<(), ObserverError>;
}

/// Handle returned by [`EventBridge::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Subscription {
    id: ObserverId,
    observer: Arc<dyn Observer>,
}

#[derive(Default)]
pub struct EventBridge {
    observers: RwLock<Vec<Subscription>>,
    /// Most durable sink; told about failures of the other observers.
    fallback: RwLock<Option<ObserverId>>,
    next_id: AtomicU64,
    /// Held for the whole fan-out; guards the sequence counter.
    publish_lock: Mutex<u64>,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer at the end of the delivery order.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription { id, observer });
        id
    }

    /// Adds an observer and marks it as the sink for failure reports.
    pub fn subscribe_fallback(&self, observer: Arc<dyn Observer>) -> ObserverId {
        let id = self.subscribe(observer);
        *self.fallback.write().unwrap_or_else(PoisonError::into_inner) = Some(id);
        id
    }

    /// Removes an observer.
    ///
    /// # Returns
    /// - `true` - The observer was subscribed and has been removed
    /// - `false` - No observer with this id was subscribed
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|s| s.id != id);

        let mut fallback = self.fallback.write().unwrap_or_else(PoisonError::into_inner);
        if *fallback == Some(id) {
            *fallback = None;
        }

        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Publishes a typed session event.
    pub fn publish(&self, event: SessionEvent) -> LogRecord {
        let (level, message) = event.describe();
        self.publish_message(level, message)
    }

    /// Publishes a free-form record.
    ///
    /// # Returns
    /// The record as delivered, including its assigned sequence number.
    pub fn publish_message(&self, level: LogLevel, message: impl Into<String>) -> LogRecord {
        let mut sequence = self
            .publish_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *sequence += 1;

        let record = LogRecord {
            sequence: *sequence,
            at: Local::now(),
            level,
            message: message.into(),
        };

        // Snapshot so observers can (un)subscribe from inside `receive`.
        let subscribers: Vec<(ObserverId, Arc<dyn Observer>)> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|s| (s.id, s.observer.clone()))
            .collect();

        let mut failures = Vec::new();
        for (id, observer) in &subscribers {
            if let Err(err) = deliver(observer.as_ref(), &record) {
                failures.push((*id, observer.name().to_string(), err));
            }
        }

        if !failures.is_empty() {
            self.report_failures(&record, &subscribers, failures);
        }

        record
    }

    fn report_failures(
        &self,
        record: &LogRecord,
        subscribers: &[(ObserverId, Arc<dyn Observer>)],
        failures: Vec<(ObserverId, String, ObserverError)>,
    ) {
        let fallback_id = *self.fallback.read().unwrap_or_else(PoisonError::into_inner);
        let fallback = fallback_id.and_then(|fid| {
            subscribers
                .iter()
                .find(|(id, _)| *id == fid)
                .map(|(id, observer)| (*id, observer.clone()))
        });

        for (failed_id, name, err) in failures {
            tracing::error!(
                "Log observer '{}' failed to receive record #{}: {}",
                name,
                record.sequence,
                err
            );

            if let Some((fallback_id, fallback)) = &fallback {
                if *fallback_id == failed_id {
                    continue;
                }
                let report = LogRecord {
                    sequence: record.sequence,
                    at: record.at,
                    level: LogLevel::Error,
                    message: format!(
                        "Log observer '{name}' failed to receive record #{}: {err}",
                        record.sequence
                    ),
                };
                if let Err(err) = deliver(fallback.as_ref(), &report) {
                    tracing::error!("Fallback log observer failed: {}", err);
                }
            }
        }
    }
}

/// Calls `receive`, converting a panic into an error.
fn deliver(observer: &dyn Observer, record: &LogRecord) -> Result<(), ObserverError> {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.receive(record))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ObserverError::Panicked(reason))
        }
    }
}
