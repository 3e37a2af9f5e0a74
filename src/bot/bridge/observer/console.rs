use dioxus_logger::tracing;

use crate::bot::bridge::Observer;
use crate::bot::error::observer::ObserverError;
use crate::model::log::{LogLevel, LogRecord};

/// Re-emits records as tracing events so they reach the console subscriber.
pub struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn name(&self) -> &str {
        "console"
    }

    fn receive(&self, record: &LogRecord) -> Result<(), ObserverError> {
        match record.level {
            LogLevel::Debug => tracing::debug!(target: "bridge", "{}", record.message),
            LogLevel::Info => tracing::info!(target: "bridge", "{}", record.message),
            LogLevel::Warn => tracing::warn!(target: "bridge", "{}", record.message),
            LogLevel::Error => tracing::error!(target: "bridge", "{}", record.message),
        }
        Ok(())
    }
}
